//! Polynomial free-energy material with exact derivatives.
//!
//! Represents `F(x_1, .., x_n) = sum_t c_t * prod_i x_i^p_ti` over a fixed
//! list of argument variables and declares every derivative up to the
//! configured order, including the ones that are identically zero. A
//! mixed partial that vanishes for this polynomial is therefore still a
//! declared property with value zero, which a consumer can tell apart
//! from a derivative nobody declared.
//!
//! Constructed via the builder pattern: [`PolynomialMaterial::builder`].

use smallvec::SmallVec;
use temper_core::{MaterialError, PropertyKey};
use temper_material::{Material, PropertyWriter, QpContext};

/// One monomial `coefficient * prod_i x_i^powers[i]`.
#[derive(Debug, Clone)]
struct Term {
    coefficient: f64,
    /// One exponent per argument, in argument order.
    powers: SmallVec<[u32; 4]>,
}

impl Term {
    /// Partial derivative of the monomial. `counts[i]` is how many times
    /// to differentiate with respect to argument `i`.
    fn derivative(&self, x: &[f64], counts: &[u32]) -> f64 {
        let mut acc = self.coefficient;
        for ((&p, &k), &xi) in self.powers.iter().zip(counts).zip(x) {
            if k > p {
                return 0.0;
            }
            let falling: f64 = (0..k).map(|j| f64::from(p - j)).product();
            acc *= falling * xi.powi((p - k) as i32);
        }
        acc
    }
}

/// A polynomial material property in named variables.
///
/// # Construction
///
/// ```
/// use temper_material::Material;
/// use temper_materials::PolynomialMaterial;
///
/// // F(u, v, w) = u*v + w^2
/// let mat = PolynomialMaterial::builder()
///     .name("free_energy")
///     .args(["u", "v", "w"])
///     .term(1.0, &[("u", 1), ("v", 1)])
///     .term(1.0, &[("w", 2)])
///     .build()
///     .unwrap();
///
/// assert!(mat.declares_derivative("F", &["v", "w"]));
/// ```
#[derive(Debug, Clone)]
pub struct PolynomialMaterial {
    name: String,
    property: String,
    args: Vec<String>,
    terms: Vec<Term>,
    outputs: Vec<PropertyKey>,
    /// Per output, derivative counts per argument.
    counts: Vec<SmallVec<[u32; 4]>>,
}

/// Builder for [`PolynomialMaterial`].
///
/// Required: `name`. The property name defaults to `"F"` and the
/// derivative order to 2.
pub struct PolynomialMaterialBuilder {
    name: Option<String>,
    property: String,
    args: Vec<String>,
    terms: Vec<(f64, Vec<(String, u32)>)>,
    derivative_order: usize,
}

impl PolynomialMaterial {
    /// Create a new builder.
    pub fn builder() -> PolynomialMaterialBuilder {
        PolynomialMaterialBuilder {
            name: None,
            property: "F".to_string(),
            args: Vec::new(),
            terms: Vec::new(),
            derivative_order: 2,
        }
    }

    /// Name of the property this material supplies.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Argument variables, in declaration order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Evaluate the derivative described by `counts` at `x`.
    fn eval(&self, x: &[f64], counts: &[u32]) -> f64 {
        self.terms.iter().map(|t| t.derivative(x, counts)).sum()
    }
}

impl PolynomialMaterialBuilder {
    /// Set the material name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the property name (default `"F"`).
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    /// Add one argument variable.
    pub fn arg(mut self, var: impl Into<String>) -> Self {
        self.args.push(var.into());
        self
    }

    /// Add several argument variables.
    pub fn args<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(vars.into_iter().map(Into::into));
        self
    }

    /// Add the monomial `coefficient * prod (var ^ power)`.
    pub fn term(mut self, coefficient: f64, factors: &[(&str, u32)]) -> Self {
        self.terms.push((
            coefficient,
            factors.iter().map(|&(v, p)| (v.to_string(), p)).collect(),
        ));
        self
    }

    /// Highest derivative order to declare, 0 to 2 (default 2).
    pub fn derivative_order(mut self, order: usize) -> Self {
        self.derivative_order = order;
        self
    }

    /// Build the material, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `name` is not set, or the property name is empty
    /// - an argument is listed twice
    /// - a term uses a variable that is not an argument
    /// - a coefficient is not finite
    /// - `derivative_order > 2`
    pub fn build(self) -> Result<PolynomialMaterial, String> {
        let name = self.name.ok_or_else(|| "name is required".to_string())?;
        if self.property.is_empty() {
            return Err("property name must not be empty".to_string());
        }
        if self.derivative_order > 2 {
            return Err(format!(
                "derivative_order must be 0, 1 or 2, got {}",
                self.derivative_order
            ));
        }
        for (i, arg) in self.args.iter().enumerate() {
            if self.args[..i].contains(arg) {
                return Err(format!("argument '{arg}' listed twice"));
            }
        }

        let n = self.args.len();
        let mut terms = Vec::with_capacity(self.terms.len());
        for (coefficient, factors) in self.terms {
            if !coefficient.is_finite() {
                return Err(format!("coefficient must be finite, got {coefficient}"));
            }
            let mut powers: SmallVec<[u32; 4]> = SmallVec::from_elem(0, n);
            for (var, power) in factors {
                let idx = self
                    .args
                    .iter()
                    .position(|a| *a == var)
                    .ok_or_else(|| format!("term variable '{var}' is not an argument"))?;
                powers[idx] += power;
            }
            terms.push(Term {
                coefficient,
                powers,
            });
        }

        let mut outputs = vec![PropertyKey::value(self.property.as_str())];
        let mut counts: Vec<SmallVec<[u32; 4]>> = vec![SmallVec::from_elem(0, n)];
        if self.derivative_order >= 1 {
            for i in 0..n {
                outputs.push(PropertyKey::first(
                    self.property.as_str(),
                    self.args[i].as_str(),
                ));
                let mut c = SmallVec::from_elem(0, n);
                c[i] = 1;
                counts.push(c);
            }
        }
        if self.derivative_order >= 2 {
            for i in 0..n {
                for j in i..n {
                    outputs.push(PropertyKey::second(
                        self.property.as_str(),
                        self.args[i].as_str(),
                        self.args[j].as_str(),
                    ));
                    let mut c = SmallVec::from_elem(0, n);
                    c[i] += 1;
                    c[j] += 1;
                    counts.push(c);
                }
            }
        }

        Ok(PolynomialMaterial {
            name,
            property: self.property,
            args: self.args,
            terms,
            outputs,
            counts,
        })
    }
}

impl Material for PolynomialMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        self.outputs.clone()
    }

    fn dependencies(&self, property: &str) -> Vec<String> {
        if property == self.property {
            self.args.clone()
        } else {
            Vec::new()
        }
    }

    fn compute_qp(
        &self,
        ctx: &QpContext<'_>,
        out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        let x = self
            .args
            .iter()
            .map(|a| ctx.value(a))
            .collect::<Result<SmallVec<[f64; 4]>, _>>()?;
        for (i, counts) in self.counts.iter().enumerate() {
            out.set(i, self.eval(&x, counts))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// F(u, v, w) = u*v + w^2
    fn uvw() -> PolynomialMaterial {
        PolynomialMaterial::builder()
            .name("uvw")
            .args(["u", "v", "w"])
            .term(1.0, &[("u", 1), ("v", 1)])
            .term(1.0, &[("w", 2)])
            .build()
            .unwrap()
    }

    fn d(mat: &PolynomialMaterial, x: &[f64], key: &PropertyKey) -> f64 {
        let i = mat.outputs.iter().position(|k| k == key).unwrap();
        mat.eval(x, &mat.counts[i])
    }

    #[test]
    fn declares_all_derivatives_up_to_order() {
        let mat = uvw();
        // value + 3 first + 6 second
        assert_eq!(mat.supplies().len(), 10);
        assert!(mat.declares_property("F"));
        assert!(mat.declares_derivative("F", &["w", "v"]));
        assert_eq!(mat.dependencies("F"), ["u", "v", "w"]);
        assert!(mat.dependencies("G").is_empty());
    }

    #[test]
    fn values_and_derivatives_are_exact() {
        let mat = uvw();
        let x = [2.0, 3.0, 5.0];
        assert_eq!(d(&mat, &x, &PropertyKey::value("F")), 31.0);
        assert_eq!(d(&mat, &x, &PropertyKey::first("F", "v")), 2.0);
        assert_eq!(d(&mat, &x, &PropertyKey::first("F", "w")), 10.0);
        assert_eq!(d(&mat, &x, &PropertyKey::second("F", "u", "v")), 1.0);
        assert_eq!(d(&mat, &x, &PropertyKey::second("F", "w", "w")), 2.0);
        assert_eq!(d(&mat, &x, &PropertyKey::second("F", "v", "w")), 0.0);
        assert_eq!(d(&mat, &x, &PropertyKey::second("F", "v", "v")), 0.0);
    }

    #[test]
    fn cubic_second_derivative() {
        // F(c) = c^3 / 3 - c
        let mat = PolynomialMaterial::builder()
            .name("cubic")
            .arg("c")
            .term(1.0 / 3.0, &[("c", 3)])
            .term(-1.0, &[("c", 1)])
            .build()
            .unwrap();
        let x = [0.5];
        assert!((d(&mat, &x, &PropertyKey::first("F", "c")) - (-0.75)).abs() < 1e-12);
        assert!((d(&mat, &x, &PropertyKey::second("F", "c", "c")) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn first_order_only_omits_second_derivatives() {
        let mat = PolynomialMaterial::builder()
            .name("lin")
            .args(["a", "b"])
            .term(2.0, &[("a", 1)])
            .derivative_order(1)
            .build()
            .unwrap();
        assert_eq!(mat.supplies().len(), 3);
        assert!(!mat.declares_derivative("F", &["a", "b"]));
    }

    #[test]
    fn builder_rejects_missing_name() {
        let result = PolynomialMaterial::builder().arg("c").build();
        assert!(result.unwrap_err().contains("name"));
    }

    #[test]
    fn builder_rejects_unknown_term_variable() {
        let result = PolynomialMaterial::builder()
            .name("bad")
            .arg("c")
            .term(1.0, &[("eta", 2)])
            .build();
        assert!(result.unwrap_err().contains("eta"));
    }

    #[test]
    fn builder_rejects_duplicate_argument() {
        let result = PolynomialMaterial::builder()
            .name("dup")
            .args(["c", "c"])
            .build();
        assert!(result.unwrap_err().contains("twice"));
    }

    #[test]
    fn builder_rejects_third_order() {
        let result = PolynomialMaterial::builder()
            .name("deep")
            .derivative_order(3)
            .build();
        assert!(result.unwrap_err().contains("derivative_order"));
    }

    proptest! {
        /// Every declared first derivative matches a central difference
        /// of the value, and every second derivative one of the first.
        #[test]
        fn derivatives_match_central_differences(
            u in -1.5f64..1.5,
            v in -1.5f64..1.5,
            w in -1.5f64..1.5,
        ) {
            let mat = PolynomialMaterial::builder()
                .name("mixed")
                .args(["u", "v", "w"])
                .term(0.5, &[("u", 3), ("v", 1)])
                .term(-2.0, &[("v", 2), ("w", 2)])
                .term(1.5, &[("w", 1)])
                .build()
                .unwrap();
            let x = [u, v, w];
            let h = 1e-5;
            for (a, name_a) in ["u", "v", "w"].iter().enumerate() {
                let mut plus = x;
                let mut minus = x;
                plus[a] += h;
                minus[a] -= h;
                let fd = (d(&mat, &plus, &PropertyKey::value("F"))
                    - d(&mat, &minus, &PropertyKey::value("F")))
                    / (2.0 * h);
                let exact = d(&mat, &x, &PropertyKey::first("F", *name_a));
                prop_assert!((fd - exact).abs() < 1e-6);

                for name_b in ["u", "v", "w"] {
                    let first = PropertyKey::first("F", name_b);
                    let fd = (d(&mat, &plus, &first) - d(&mat, &minus, &first)) / (2.0 * h);
                    let exact = d(&mat, &x, &PropertyKey::second("F", *name_a, name_b));
                    prop_assert!((fd - exact).abs() < 1e-6);
                }
            }
        }
    }
}
