//! Per-element property storage and the material evaluation pass.
//!
//! [`PropertyBuffers`] hold one `Vec<f64>` per [`PropertySlot`], each
//! sized to the current element's quadrature point count. They are
//! owned by whoever drives assembly: concurrent element evaluations
//! each need their own buffers, while the [`PropertyLayout`] is shared.

use temper_core::{ElementId, EvaluationError, LayoutId, MaterialError, VariableValues};

use crate::layout::{PropertyLayout, PropertySlot};
use crate::material::QpContext;

/// Quadrature-point arrays for every slot of a [`PropertyLayout`].
#[derive(Debug, Clone)]
pub struct PropertyBuffers {
    layout: LayoutId,
    /// `data[slot][qp]`; the last entry is the zero slot.
    data: Vec<Vec<f64>>,
    n_qp: usize,
}

impl PropertyBuffers {
    /// Allocate empty buffers matching `layout`.
    pub fn new(layout: &PropertyLayout) -> Self {
        Self {
            layout: layout.id(),
            data: vec![Vec::new(); layout.len() + 1],
            n_qp: 0,
        }
    }

    /// Layout these buffers were allocated for.
    pub fn layout_id(&self) -> LayoutId {
        self.layout
    }

    /// Quadrature point count of the last evaluation.
    pub fn n_qp(&self) -> usize {
        self.n_qp
    }

    /// Number of slots, including the zero slot.
    pub fn slot_count(&self) -> usize {
        self.data.len()
    }

    /// Values stored in `slot`, one per quadrature point.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not produced by the layout these buffers
    /// were built from.
    pub fn get(&self, slot: PropertySlot) -> &[f64] {
        &self.data[slot.index()]
    }

    /// Resize every slot to `n_qp` points and clear stale values.
    pub fn reset(&mut self, n_qp: usize) {
        for values in &mut self.data {
            values.clear();
            values.resize(n_qp, 0.0);
        }
        self.n_qp = n_qp;
    }
}

/// Write access for one material at one quadrature point.
///
/// Output `i` is the `i`-th key of the material's
/// [`supplies()`](crate::Material::supplies) list.
pub struct PropertyWriter<'a> {
    outputs: &'a [usize],
    data: &'a mut [Vec<f64>],
    qp: usize,
}

impl<'a> PropertyWriter<'a> {
    /// Construct a writer over raw slot arrays.
    pub(crate) fn new(outputs: &'a [usize], data: &'a mut [Vec<f64>], qp: usize) -> Self {
        Self { outputs, data, qp }
    }

    /// Number of outputs the material may write.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the material declares no outputs.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Store `value` for output `index` at the current quadrature point.
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), MaterialError> {
        let slot = *self
            .outputs
            .get(index)
            .ok_or(MaterialError::UndeclaredOutput {
                index,
                declared: self.outputs.len(),
            })?;
        self.data[slot][self.qp] = value;
        Ok(())
    }
}

/// Evaluate a region's materials over one element.
///
/// Materials run in collection order; each fills every quadrature point
/// before the next starts. Buffers are reset first, so values from the
/// previous element never leak into this one.
pub fn evaluate_materials(
    layout: &PropertyLayout,
    element: ElementId,
    n_qp: usize,
    variables: &dyn VariableValues,
    buffers: &mut PropertyBuffers,
) -> Result<(), EvaluationError> {
    if buffers.layout_id() != layout.id() {
        return Err(EvaluationError::LayoutMismatch {
            buffers: buffers.layout_id(),
            layout: layout.id(),
        });
    }

    buffers.reset(n_qp);
    tracing::trace!(region = %layout.region(), %element, n_qp, "evaluating materials");

    for (m, material) in layout.materials().iter().enumerate() {
        let outputs = layout.outputs(m);
        for qp in 0..n_qp {
            let ctx = QpContext::new(layout.region(), element, qp, n_qp, variables);
            let mut out = PropertyWriter::new(outputs, &mut buffers.data, qp);
            material
                .compute_qp(&ctx, &mut out)
                .map_err(|reason| EvaluationError::MaterialFailed {
                    material: material.name().to_string(),
                    qp,
                    reason,
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Material, MaterialHandle};
    use temper_core::{PropertyKey, Region, SubdomainId};

    struct NoVars;

    impl VariableValues for NoVars {
        fn values(&self, _var: &str) -> Option<&[f64]> {
            None
        }
    }

    /// Writes `qp * scale` to its single output.
    struct Ramp {
        scale: f64,
    }

    impl Material for Ramp {
        fn name(&self) -> &str {
            "ramp"
        }
        fn supplies(&self) -> Vec<PropertyKey> {
            vec![PropertyKey::value("R")]
        }
        fn compute_qp(
            &self,
            ctx: &QpContext<'_>,
            out: &mut PropertyWriter<'_>,
        ) -> Result<(), MaterialError> {
            out.set(0, ctx.qp() as f64 * self.scale)
        }
    }

    /// Writes to an output index it never declared.
    struct Rogue;

    impl Material for Rogue {
        fn name(&self) -> &str {
            "rogue"
        }
        fn supplies(&self) -> Vec<PropertyKey> {
            vec![PropertyKey::value("X")]
        }
        fn compute_qp(
            &self,
            _ctx: &QpContext<'_>,
            out: &mut PropertyWriter<'_>,
        ) -> Result<(), MaterialError> {
            out.set(1, 1.0)
        }
    }

    fn layout_of(materials: Vec<MaterialHandle>) -> PropertyLayout {
        PropertyLayout::build(Region::Block(SubdomainId(0)), &materials)
    }

    #[test]
    fn evaluation_fills_every_point() {
        let layout = layout_of(vec![MaterialHandle::new(Ramp { scale: 2.0 })]);
        let mut buffers = PropertyBuffers::new(&layout);
        evaluate_materials(&layout, ElementId(0), 4, &NoVars, &mut buffers).unwrap();

        let slot = layout.slot(&PropertyKey::value("R")).unwrap();
        assert_eq!(buffers.get(slot), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(buffers.get(layout.zero_slot()), &[0.0; 4]);
        assert_eq!(buffers.n_qp(), 4);
    }

    #[test]
    fn buffers_shrink_with_the_element() {
        let layout = layout_of(vec![MaterialHandle::new(Ramp { scale: 1.0 })]);
        let mut buffers = PropertyBuffers::new(&layout);
        evaluate_materials(&layout, ElementId(0), 8, &NoVars, &mut buffers).unwrap();
        evaluate_materials(&layout, ElementId(1), 2, &NoVars, &mut buffers).unwrap();

        let slot = layout.slot(&PropertyKey::value("R")).unwrap();
        assert_eq!(buffers.get(slot), &[0.0, 1.0]);
    }

    #[test]
    fn undeclared_output_is_reported() {
        let layout = layout_of(vec![MaterialHandle::new(Rogue)]);
        let mut buffers = PropertyBuffers::new(&layout);
        let err = evaluate_materials(&layout, ElementId(0), 1, &NoVars, &mut buffers).unwrap_err();
        match err {
            EvaluationError::MaterialFailed {
                material,
                qp,
                reason,
            } => {
                assert_eq!(material, "rogue");
                assert_eq!(qp, 0);
                assert_eq!(
                    reason,
                    MaterialError::UndeclaredOutput {
                        index: 1,
                        declared: 1
                    }
                );
            }
            other => panic!("expected MaterialFailed, got {other:?}"),
        }
    }

    #[test]
    fn foreign_buffers_are_rejected() {
        // Same slot count, different layout.
        let first = layout_of(vec![MaterialHandle::new(Ramp { scale: 1.0 })]);
        let second = layout_of(vec![MaterialHandle::new(Ramp { scale: 1.0 })]);
        let mut buffers = PropertyBuffers::new(&first);
        let err = evaluate_materials(&second, ElementId(0), 1, &NoVars, &mut buffers).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::LayoutMismatch {
                buffers: first.id(),
                layout: second.id(),
            }
        );
    }
}
