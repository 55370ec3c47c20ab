//! Constant material coefficients.

use temper_core::{MaterialError, PropertyKey};
use temper_material::{Material, PropertyWriter, QpContext};

/// Supplies fixed property values at every quadrature point.
///
/// Every derivative of a constant is zero, and this material says so
/// through [`Material::derivatives_vanish`]; consumers resolving any
/// derivative of its properties get the shared zero slot.
#[derive(Debug, Clone)]
pub struct ConstantMaterial {
    name: String,
    properties: Vec<(String, f64)>,
}

impl ConstantMaterial {
    /// Create a material with no properties yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Add a constant property. A repeated name replaces the old value.
    pub fn with(mut self, property: impl Into<String>, value: f64) -> Self {
        let property = property.into();
        match self.properties.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((property, value)),
        }
        self
    }
}

impl Material for ConstantMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        self.properties
            .iter()
            .map(|(p, _)| PropertyKey::value(p.as_str()))
            .collect()
    }

    fn derivatives_vanish(&self, property: &str) -> bool {
        self.properties.iter().any(|(p, _)| p == property)
    }

    fn compute_qp(
        &self,
        _ctx: &QpContext<'_>,
        out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        for (i, (_, value)) in self.properties.iter().enumerate() {
            out.set(i, *value)?;
        }
        Ok(())
    }
}
