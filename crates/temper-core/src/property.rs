//! Property and derivative keys.
//!
//! A [`PropertyKey`] names either a material property value (`F`) or one
//! of its derivatives (`dF/dv`, `d^2F/dudv`). Differentiation variables
//! are stored in sorted order, so mixed partials that only differ in the
//! order of differentiation map to the same key.

use smallvec::SmallVec;
use std::fmt;

/// Key identifying a property value or a partial derivative of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey {
    name: String,
    vars: SmallVec<[String; 2]>,
}

impl PropertyKey {
    /// Key for the value of property `name` itself.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: SmallVec::new(),
        }
    }

    /// Key for `d(name)/d(var)`.
    pub fn first(name: impl Into<String>, var: impl Into<String>) -> Self {
        let mut vars = SmallVec::new();
        vars.push(var.into());
        Self {
            name: name.into(),
            vars,
        }
    }

    /// Key for `d^2(name)/d(a)d(b)`.
    pub fn second(name: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::derivative(name, [a.into(), b.into()])
    }

    /// Key for a derivative of arbitrary order. An empty variable list
    /// yields the value key.
    pub fn derivative<I, S>(name: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vars: SmallVec<[String; 2]> = vars.into_iter().map(Into::into).collect();
        vars.sort_unstable();
        Self {
            name: name.into(),
            vars,
        }
    }

    /// Name of the underlying property.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Differentiation variables, in canonical (sorted) order.
    pub fn variables(&self) -> &[String] {
        &self.vars
    }

    /// Derivative order: 0 for the plain value.
    pub fn order(&self) -> usize {
        self.vars.len()
    }

    /// Whether this key names the plain property value.
    pub fn is_value(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether `var` is one of the differentiation variables.
    pub fn differentiates(&self, var: &str) -> bool {
        self.vars.iter().any(|v| v == var)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vars.len() {
            0 => write!(f, "{}", self.name),
            1 => write!(f, "d{}/d{}", self.name, self.vars[0]),
            n => {
                write!(f, "d^{n}{}/", self.name)?;
                let mut i = 0;
                while i < n {
                    let var = &self.vars[i];
                    let run = self.vars[i..].iter().take_while(|v| *v == var).count();
                    if run > 1 {
                        write!(f, "d{var}^{run}")?;
                    } else {
                        write!(f, "d{var}")?;
                    }
                    i += run;
                }
                Ok(())
            }
        }
    }
}
