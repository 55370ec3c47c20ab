//! Stateful running-maximum material.
//!
//! `H = max(H_old, x)` per element and quadrature point, the irreversible
//! history variable used e.g. to drive phase-field fracture from the
//! largest strain energy seen so far. `H_old` is only replaced when the
//! warehouse advances state at the end of a converged step, so repeated
//! nonlinear iterations within a step all start from the same history.

use std::sync::Mutex;

use temper_core::{MaterialError, PropertyKey};
use temper_material::{Material, PropertyWriter, QpContext, StatefulStore};

/// Output indices, in `supplies()` order.
const OUT_VALUE: usize = 0;
const OUT_OLD: usize = 1;
const OUT_DERIVATIVE: usize = 2;

/// Running maximum of a driving variable.
///
/// Supplies `property`, `{property}_old`, and `d(property)/d(driver)`,
/// which is 1 where the driver exceeds the stored history and 0
/// elsewhere.
#[derive(Debug)]
pub struct HistoryMaterial {
    name: String,
    property: String,
    old_property: String,
    driver: String,
    store: Mutex<StatefulStore>,
}

impl HistoryMaterial {
    /// Track the maximum of `driver` as `property`, starting at `initial`.
    pub fn new(
        name: impl Into<String>,
        property: impl Into<String>,
        driver: impl Into<String>,
        initial: f64,
    ) -> Self {
        let property = property.into();
        Self {
            name: name.into(),
            old_property: format!("{property}_old"),
            property,
            driver: driver.into(),
            store: Mutex::new(StatefulStore::new(initial)),
        }
    }

    /// Number of state advances applied so far.
    pub fn generation(&self) -> Result<u64, MaterialError> {
        Ok(self.lock()?.generation())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StatefulStore>, MaterialError> {
        self.store
            .lock()
            .map_err(|_| MaterialError::StateUnavailable {
                reason: format!("history store of '{}' is poisoned", self.name),
            })
    }
}

impl Material for HistoryMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        vec![
            PropertyKey::value(self.property.as_str()),
            PropertyKey::value(self.old_property.as_str()),
            PropertyKey::first(self.property.as_str(), self.driver.as_str()),
        ]
    }

    fn dependencies(&self, property: &str) -> Vec<String> {
        if property == self.property {
            vec![self.driver.clone()]
        } else {
            Vec::new()
        }
    }

    fn compute_qp(
        &self,
        ctx: &QpContext<'_>,
        out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        let x = ctx.value(&self.driver)?;
        let mut store = self.lock()?;
        let old = store.old(ctx.element(), ctx.qp());
        let (value, slope) = if x > old { (x, 1.0) } else { (old, 0.0) };
        store.set(ctx.element(), ctx.qp(), value);
        drop(store);

        out.set(OUT_VALUE, value)?;
        out.set(OUT_OLD, old)?;
        out.set(OUT_DERIVATIVE, slope)
    }

    fn advance_state(&self) -> Result<(), MaterialError> {
        self.lock()?.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplies_value_old_and_slope() {
        let mat = HistoryMaterial::new("history", "H", "psi", 0.0);
        assert!(mat.declares_property("H"));
        assert!(mat.declares_property("H_old"));
        assert!(mat.declares_derivative("H", &["psi"]));
        assert_eq!(mat.dependencies("H"), ["psi"]);
    }

    #[test]
    fn advance_bumps_generation() {
        let mat = HistoryMaterial::new("history", "H", "psi", 0.0);
        assert_eq!(mat.generation(), Ok(0));
        mat.advance_state().unwrap();
        mat.advance_state().unwrap();
        assert_eq!(mat.generation(), Ok(2));
    }
}
