//! Test utilities and mock types for Temper development.
//!
//! Provides a mock [`VariableValues`] implementation and the reusable
//! material fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use temper_core::VariableValues;

/// Mock implementation of [`VariableValues`].
///
/// Backed by a `HashMap<String, Vec<f64>>`. Pre-populate variables with
/// [`set`](MockVariableValues::set) before passing to code under test.
#[derive(Debug, Default, Clone)]
pub struct MockVariableValues {
    values: HashMap<String, Vec<f64>>,
}

impl MockVariableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-qp values of one variable.
    pub fn set(&mut self, var: impl Into<String>, values: Vec<f64>) {
        self.values.insert(var.into(), values);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, var: impl Into<String>, values: Vec<f64>) -> Self {
        self.set(var, values);
        self
    }

    /// Set every variable to a single constant over `n_qp` points.
    pub fn uniform<'a>(vars: impl IntoIterator<Item = (&'a str, f64)>, n_qp: usize) -> Self {
        let mut mock = Self::new();
        for (var, value) in vars {
            mock.set(var, vec![value; n_qp]);
        }
        mock
    }

    /// Number of variables with values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableValues for MockVariableValues {
    fn values(&self, var: &str) -> Option<&[f64]> {
        self.values.get(var).map(|v| v.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_fills_every_point() {
        let mock = MockVariableValues::uniform([("u", 2.0), ("v", 3.0)], 3);
        assert_eq!(mock.values("u"), Some(&[2.0, 2.0, 2.0][..]));
        assert_eq!(mock.len(), 2);
        assert!(mock.values("w").is_none());
    }
}
