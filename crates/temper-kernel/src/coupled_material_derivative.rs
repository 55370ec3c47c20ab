//! First derivative of a material property with respect to a coupled
//! variable, as a residual contribution.
//!
//! For property `F`, coupled variable `v` and kernel variable `u`:
//!
//! ```text
//! R_i      = dF/dv        * test_i
//! J_ij     = d^2F/dv du   * test_i * phi_j
//! J_ij(w)  = d^2F/dv dw   * test_i * phi_j    for each coupled w
//! ```
//!
//! All derivative slots are resolved, and the coupling list checked
//! against what `F` depends on, when the kernel is built.

use smallvec::SmallVec;
use temper_core::{LayoutId, VarId, VariableTable};
use temper_material::{DerivativeResolver, PropertySlot};

use crate::context::KernelContext;
use crate::error::KernelError;
use crate::jvar::JvarMap;
use crate::kernel::Kernel;
use crate::params::CoupledMaterialDerivativeParams;

/// Kernel assembling `(dF/dv, test)` with its full Jacobian.
///
/// # Examples
///
/// ```
/// use temper_core::{Region, SubdomainId, VariableTable};
/// use temper_kernel::{CoupledMaterialDerivative, CoupledMaterialDerivativeParams};
/// use temper_material::{MaterialHandle, PropertyLayout};
/// use temper_materials::PolynomialMaterial;
///
/// let f = PolynomialMaterial::builder()
///     .name("free_energy")
///     .args(["u", "v"])
///     .term(1.0, &[("u", 1), ("v", 1)])
///     .build()
///     .unwrap();
/// let layout = PropertyLayout::build(Region::Block(SubdomainId(0)), &[MaterialHandle::new(f)]);
/// let vars: VariableTable = ["u", "v"].into_iter().collect();
///
/// let kernel = CoupledMaterialDerivative::new(
///     "dFdv",
///     &CoupledMaterialDerivativeParams::new("u", "v"),
///     &vars,
///     &layout,
/// )
/// .unwrap();
/// assert_eq!(kernel.coupled_names(), ["v"]);
/// ```
#[derive(Debug, Clone)]
pub struct CoupledMaterialDerivative {
    name: String,
    variable: VarId,
    layout: LayoutId,
    f_name: String,
    v_name: String,
    coupled_names: Vec<String>,
    dfdv: PropertySlot,
    d2fdvdu: PropertySlot,
    /// `d^2F/dv d(coupled[cvar])`, indexed by local coupling index.
    d2fdvdarg: Vec<PropertySlot>,
    jvar_map: JvarMap,
}

impl CoupledMaterialDerivative {
    /// Validate `params`, resolve every derivative slot against
    /// `resolver`, and check that `F` depends on nothing outside the
    /// kernel variable and its coupled variables.
    ///
    /// # Errors
    ///
    /// - [`KernelError::Config`] for invalid parameters.
    /// - [`KernelError::UnknownVariable`] if a variable name is not in
    ///   `variables`.
    /// - [`KernelError::Resolve`] wrapping `MissingProperty`,
    ///   `MissingDerivative` or `IncompleteCoupling`.
    pub fn new(
        name: impl Into<String>,
        params: &CoupledMaterialDerivativeParams,
        variables: &VariableTable,
        resolver: &dyn DerivativeResolver,
    ) -> Result<Self, KernelError> {
        let name = name.into();
        params.validate()?;

        let lookup = |var: &str| {
            variables
                .id(var)
                .ok_or_else(|| KernelError::UnknownVariable {
                    variable: var.to_string(),
                })
        };
        let u = params.variable.as_str();
        let v = params.v.as_str();
        let f = params.f_name.as_str();
        let variable = lookup(u)?;
        let coupled = params.coupled();
        let coupled_ids = coupled
            .iter()
            .map(|&c| lookup(c))
            .collect::<Result<Vec<_>, _>>()?;

        let dfdv = resolver.derivative(f, &[v])?;
        let d2fdvdu = resolver.derivative(f, &[v, u])?;
        let d2fdvdarg = coupled
            .iter()
            .map(|&c| resolver.derivative(f, &[v, c]))
            .collect::<Result<Vec<_>, _>>()?;

        let allowed: SmallVec<[&str; 4]> =
            std::iter::once(u).chain(coupled.iter().copied()).collect();
        resolver.validate_coupling(f, &allowed)?;

        tracing::debug!(
            kernel = %name,
            region = %resolver.region(),
            property = f,
            v,
            coupled = ?coupled,
            "coupled material derivative set up"
        );

        Ok(Self {
            name,
            variable,
            layout: resolver.layout_id(),
            f_name: params.f_name.clone(),
            v_name: params.v.clone(),
            coupled_names: coupled.iter().map(|c| c.to_string()).collect(),
            dfdv,
            d2fdvdu,
            d2fdvdarg,
            jvar_map: JvarMap::new(&coupled_ids),
        })
    }

    /// Name of the differentiated property.
    pub fn f_name(&self) -> &str {
        &self.f_name
    }

    /// Name of the variable `F` is differentiated by.
    pub fn v_name(&self) -> &str {
        &self.v_name
    }

    /// Coupled variable names in local coupling order.
    pub fn coupled_names(&self) -> &[String] {
        &self.coupled_names
    }
}

impl Kernel for CoupledMaterialDerivative {
    fn name(&self) -> &str {
        &self.name
    }

    fn variable(&self) -> VarId {
        self.variable
    }

    fn jvar_map(&self) -> &JvarMap {
        &self.jvar_map
    }

    fn layout_id(&self) -> Option<LayoutId> {
        Some(self.layout)
    }

    #[inline]
    fn qp_residual(&self, ctx: &KernelContext<'_>, i: usize, qp: usize) -> f64 {
        ctx.property(self.dfdv)[qp] * ctx.test(i, qp)
    }

    #[inline]
    fn qp_jacobian(&self, ctx: &KernelContext<'_>, i: usize, j: usize, qp: usize) -> f64 {
        ctx.property(self.d2fdvdu)[qp] * ctx.test(i, qp) * ctx.phi(j, qp)
    }

    #[inline]
    fn qp_off_diag_jacobian(
        &self,
        ctx: &KernelContext<'_>,
        cvar: usize,
        i: usize,
        j: usize,
        qp: usize,
    ) -> f64 {
        ctx.property(self.d2fdvdarg[cvar])[qp] * ctx.test(i, qp) * ctx.phi(j, qp)
    }
}
