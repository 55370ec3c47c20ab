//! The [`Material`] trait and shared [`MaterialHandle`]s.
//!
//! A material is a property provider: at each quadrature point it writes
//! values for the [`PropertyKey`]s it declares in [`Material::supplies`],
//! which may include derivatives of its properties with respect to
//! named variables.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use temper_core::{ElementId, MaterialError, MaterialId, PropertyKey, Region, VariableValues};

use crate::buffers::PropertyWriter;

/// Per-quadrature-point context handed to [`Material::compute_qp`].
pub struct QpContext<'a> {
    region: Region,
    element: ElementId,
    qp: usize,
    n_qp: usize,
    variables: &'a dyn VariableValues,
}

impl<'a> QpContext<'a> {
    /// Construct a context. Normally done by
    /// [`evaluate_materials`](crate::evaluate_materials); tests may build
    /// one directly around a mock [`VariableValues`].
    pub fn new(
        region: Region,
        element: ElementId,
        qp: usize,
        n_qp: usize,
        variables: &'a dyn VariableValues,
    ) -> Self {
        Self {
            region,
            element,
            qp,
            n_qp,
            variables,
        }
    }

    /// Region being evaluated.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Element being evaluated.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Quadrature point index within the element.
    pub fn qp(&self) -> usize {
        self.qp
    }

    /// Number of quadrature points in the element.
    pub fn n_qp(&self) -> usize {
        self.n_qp
    }

    /// Value of a coupled variable at the current quadrature point.
    pub fn value(&self, var: &str) -> Result<f64, MaterialError> {
        self.variables
            .values(var)
            .and_then(|vals| vals.get(self.qp).copied())
            .ok_or_else(|| MaterialError::MissingVariable {
                variable: var.to_string(),
            })
    }
}

/// A property provider evaluated at quadrature points.
///
/// # Contract
///
/// - `supplies()` is called once at layout construction, not per point.
///   Output index `i` passed to [`PropertyWriter::set`] refers to the
///   `i`-th key of that list.
/// - `compute_qp()` takes `&self`; state that persists across steps
///   lives behind interior mutability (see [`StatefulStore`](crate::StatefulStore)).
/// - `advance_state()` is called exactly once per step by
///   [`MaterialWarehouse::advance_state`](crate::MaterialWarehouse::advance_state),
///   however many regions share the material.
///
/// # Object safety
///
/// This trait is object-safe; the warehouse stores materials as
/// `Arc<dyn Material>` inside [`MaterialHandle`].
///
/// # Examples
///
/// ```
/// use temper_core::{MaterialError, PropertyKey};
/// use temper_material::{Material, PropertyWriter, QpContext};
///
/// struct Mobility;
///
/// impl Material for Mobility {
///     fn name(&self) -> &str { "mobility" }
///
///     fn supplies(&self) -> Vec<PropertyKey> {
///         vec![PropertyKey::value("L")]
///     }
///
///     fn compute_qp(
///         &self,
///         _ctx: &QpContext<'_>,
///         out: &mut PropertyWriter<'_>,
///     ) -> Result<(), MaterialError> {
///         out.set(0, 5.0)
///     }
/// }
///
/// assert!(Mobility.declares_property("L"));
/// assert!(!Mobility.declares_derivative("L", &["c"]));
/// ```
pub trait Material: Send + Sync + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Property values and derivatives this material writes, in output
    /// index order.
    fn supplies(&self) -> Vec<PropertyKey>;

    /// Variables the named property depends on nonlinearly.
    ///
    /// Consumers check this set against their coupled variables at setup
    /// so a forgotten coupling cannot silently drop a Jacobian term.
    /// Default: no declared dependencies.
    fn dependencies(&self, _property: &str) -> Vec<String> {
        Vec::new()
    }

    /// Whether every derivative of `property` is identically zero.
    ///
    /// When `true`, resolving a derivative this material does not supply
    /// yields a shared zero array instead of a
    /// [`ResolveError::MissingDerivative`](temper_core::ResolveError).
    /// Default: `false`.
    fn derivatives_vanish(&self, _property: &str) -> bool {
        false
    }

    /// Whether this material supplies the value of `property`.
    fn declares_property(&self, property: &str) -> bool {
        self.supplies()
            .iter()
            .any(|k| k.is_value() && k.name() == property)
    }

    /// Whether this material supplies the derivative of `property`
    /// with respect to `vars`.
    fn declares_derivative(&self, property: &str, vars: &[&str]) -> bool {
        let key = PropertyKey::derivative(property, vars.iter().copied());
        self.supplies().contains(&key)
    }

    /// Compute all declared outputs at one quadrature point.
    fn compute_qp(
        &self,
        ctx: &QpContext<'_>,
        out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError>;

    /// Promote current state to old state at the end of a step.
    ///
    /// Default: stateless, nothing to do.
    fn advance_state(&self) -> Result<(), MaterialError> {
        Ok(())
    }
}

/// Shared, non-owning-by-region reference to a material.
///
/// The [`MaterialId`] is the identity of the shared allocation. Clones of
/// one handle, and handles built from clones of one `Arc`, all register
/// as one material however many regions they are added to.
#[derive(Clone)]
pub struct MaterialHandle {
    id: MaterialId,
    inner: Arc<dyn Material>,
}

impl MaterialHandle {
    /// Wrap a material in a fresh handle.
    pub fn new<M: Material>(material: M) -> Self {
        Self::from_arc(Arc::new(material))
    }

    /// Wrap an existing `Arc`. The caller keeps its own `Arc` and can
    /// inspect the concrete material after registration.
    pub fn from_arc<M: Material>(material: Arc<M>) -> Self {
        let inner: Arc<dyn Material> = material;
        Self {
            id: MaterialId::of(&inner),
            inner,
        }
    }

    /// Identity of the underlying material instance.
    pub fn id(&self) -> MaterialId {
        self.id
    }
}

impl Deref for MaterialHandle {
    type Target = dyn Material;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl fmt::Debug for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialHandle")
            .field("id", &self.id)
            .field("name", &self.inner.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use temper_core::SubdomainId;

    struct Values(HashMap<String, Vec<f64>>);

    impl VariableValues for Values {
        fn values(&self, var: &str) -> Option<&[f64]> {
            self.0.get(var).map(|v| v.as_slice())
        }
    }

    struct Quadratic;

    impl Material for Quadratic {
        fn name(&self) -> &str {
            "quadratic"
        }
        fn supplies(&self) -> Vec<PropertyKey> {
            vec![
                PropertyKey::value("F"),
                PropertyKey::first("F", "c"),
                PropertyKey::second("F", "c", "c"),
            ]
        }
        fn compute_qp(
            &self,
            _ctx: &QpContext<'_>,
            _out: &mut PropertyWriter<'_>,
        ) -> Result<(), MaterialError> {
            Ok(())
        }
    }

    #[test]
    fn declaration_queries_follow_supplies() {
        assert!(Quadratic.declares_property("F"));
        assert!(!Quadratic.declares_property("G"));
        assert!(Quadratic.declares_derivative("F", &["c"]));
        assert!(Quadratic.declares_derivative("F", &["c", "c"]));
        assert!(!Quadratic.declares_derivative("F", &["eta"]));
        assert!(!Quadratic.derivatives_vanish("F"));
    }

    #[test]
    fn cloned_handles_share_identity() {
        let a = MaterialHandle::new(Quadratic);
        let b = a.clone();
        let c = MaterialHandle::new(Quadratic);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(b.name(), "quadratic");
    }

    #[test]
    fn handles_over_one_arc_share_identity() {
        let shared = Arc::new(Quadratic);
        let a = MaterialHandle::from_arc(Arc::clone(&shared));
        let b = MaterialHandle::from_arc(shared);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn qp_context_reads_current_point() {
        let mut map = HashMap::new();
        map.insert("c".to_string(), vec![0.1, 0.2, 0.3]);
        let vals = Values(map);
        let ctx = QpContext::new(Region::Block(SubdomainId(0)), ElementId(4), 2, 3, &vals);
        assert_eq!(ctx.value("c"), Ok(0.3));
        assert_eq!(ctx.element(), ElementId(4));
        assert!(matches!(
            ctx.value("eta"),
            Err(MaterialError::MissingVariable { .. })
        ));
    }
}
