//! Parameters for [`CoupledMaterialDerivative`](crate::CoupledMaterialDerivative).

use crate::error::ConfigError;

/// Input parameters of a [`CoupledMaterialDerivative`](crate::CoupledMaterialDerivative) kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoupledMaterialDerivativeParams {
    /// The nonlinear variable whose residual receives the term.
    pub variable: String,
    /// Variable to take the derivative with respect to.
    pub v: String,
    /// Material property to differentiate. Default: `"F"`.
    pub f_name: String,
    /// Other nonlinear variables `F` depends on, for Jacobian entries.
    pub args: Vec<String>,
}

impl Default for CoupledMaterialDerivativeParams {
    fn default() -> Self {
        Self {
            variable: String::new(),
            v: String::new(),
            f_name: "F".to_string(),
            args: Vec::new(),
        }
    }
}

impl CoupledMaterialDerivativeParams {
    /// Parameters for `variable` differentiating `F` by `v`.
    pub fn new(variable: impl Into<String>, v: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            v: v.into(),
            ..Self::default()
        }
    }

    /// Set the property name.
    pub fn with_f_name(mut self, f_name: impl Into<String>) -> Self {
        self.f_name = f_name.into();
        self
    }

    /// Set the additional coupled variables.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("variable", &self.variable),
            ("v", &self.v),
            ("f_name", &self.f_name),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyName { field });
            }
        }
        for (i, arg) in self.args.iter().enumerate() {
            if arg.is_empty() {
                return Err(ConfigError::EmptyName { field: "args" });
            }
            if *arg == self.variable {
                return Err(ConfigError::SelfCoupling {
                    variable: arg.clone(),
                });
            }
            if self.args[..i].contains(arg) {
                return Err(ConfigError::DuplicateArg {
                    variable: arg.clone(),
                });
            }
        }
        Ok(())
    }

    /// Coupled variables in local coupling order: `v` first, then
    /// `args`. An `args` entry equal to `v` is not repeated.
    pub fn coupled(&self) -> Vec<&str> {
        std::iter::once(self.v.as_str())
            .chain(
                self.args
                    .iter()
                    .map(String::as_str)
                    .filter(|a| *a != self.v),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_f() {
        let params = CoupledMaterialDerivativeParams::new("u", "v");
        assert_eq!(params.f_name, "F");
        assert!(params.args.is_empty());
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn coupled_list_starts_with_v_and_skips_repeats() {
        let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w", "v", "c"]);
        assert_eq!(params.coupled(), ["v", "w", "c"]);
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!(
            CoupledMaterialDerivativeParams::default().validate(),
            Err(ConfigError::EmptyName { field: "variable" })
        );
        assert_eq!(
            CoupledMaterialDerivativeParams::new("u", "v")
                .with_f_name("")
                .validate(),
            Err(ConfigError::EmptyName { field: "f_name" })
        );
    }

    #[test]
    fn args_must_not_contain_the_kernel_variable() {
        let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w", "u"]);
        assert_eq!(
            params.validate(),
            Err(ConfigError::SelfCoupling {
                variable: "u".into()
            })
        );
    }

    #[test]
    fn duplicate_args_are_rejected() {
        let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w", "w"]);
        assert_eq!(
            params.validate(),
            Err(ConfigError::DuplicateArg {
                variable: "w".into()
            })
        );
    }
}
