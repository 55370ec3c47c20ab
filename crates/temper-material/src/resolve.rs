//! Setup-time resolution of property and derivative names to slots.
//!
//! Every failure here is a model configuration error. Resolution runs
//! once, before the first quadrature loop, so the per-point path never
//! looks up a name.

use temper_core::{LayoutId, PropertyKey, Region, ResolveError};

use crate::layout::{PropertyLayout, PropertySlot};

/// Resolves property names and derivatives to [`PropertySlot`]s.
///
/// Implemented by [`PropertyLayout`]; consumers take `&dyn
/// DerivativeResolver` so they can be set up against a mock.
pub trait DerivativeResolver {
    /// Region the resolver serves.
    fn region(&self) -> Region;

    /// Layout the returned slots index into. Buffers from any other
    /// layout must not be read through them.
    fn layout_id(&self) -> LayoutId;

    /// Slot holding the value of `property`.
    ///
    /// Fails with [`ResolveError::MissingProperty`] if no material on
    /// the region declares it.
    fn property(&self, property: &str) -> Result<PropertySlot, ResolveError>;

    /// Slot holding the derivative of `property` with respect to `vars`.
    ///
    /// An empty `vars` resolves the value. If the derivative is not
    /// declared, the owning material decides: when it guarantees
    /// vanishing derivatives the zero slot is returned, otherwise
    /// [`ResolveError::MissingDerivative`]. A missing derivative is never
    /// silently zero-filled.
    fn derivative(&self, property: &str, vars: &[&str]) -> Result<PropertySlot, ResolveError>;

    /// Check that every variable `property` depends on is in `coupled`.
    ///
    /// The dependencies of every material writing the value of
    /// `property` are checked, not only the owner's. Fails with
    /// [`ResolveError::IncompleteCoupling`] naming the first
    /// dependency that is missing.
    fn validate_coupling(&self, property: &str, coupled: &[&str]) -> Result<(), ResolveError>;
}

impl DerivativeResolver for PropertyLayout {
    fn region(&self) -> Region {
        PropertyLayout::region(self)
    }

    fn layout_id(&self) -> LayoutId {
        self.id()
    }

    fn property(&self, property: &str) -> Result<PropertySlot, ResolveError> {
        self.slot(&PropertyKey::value(property))
            .ok_or_else(|| ResolveError::MissingProperty {
                property: property.to_string(),
                region: PropertyLayout::region(self),
            })
    }

    fn derivative(&self, property: &str, vars: &[&str]) -> Result<PropertySlot, ResolveError> {
        let value = DerivativeResolver::property(self, property)?;
        if vars.is_empty() {
            return Ok(value);
        }

        let key = PropertyKey::derivative(property, vars.iter().copied());
        if let Some(slot) = self.slot(&key) {
            return Ok(slot);
        }

        let vanishes = self
            .owner(property)
            .is_some_and(|owner| owner.derivatives_vanish(property));
        if vanishes {
            tracing::debug!(
                region = %PropertyLayout::region(self),
                derivative = %key,
                "resolved undeclared derivative to zero"
            );
            return Ok(self.zero_slot());
        }

        Err(ResolveError::MissingDerivative {
            property: property.to_string(),
            variables: key.variables().to_vec(),
            derivative: key.to_string(),
            region: PropertyLayout::region(self),
        })
    }

    fn validate_coupling(&self, property: &str, coupled: &[&str]) -> Result<(), ResolveError> {
        DerivativeResolver::property(self, property)?;

        // Every writer of the value counts, not just the owner: later
        // writers overwrite the slot during evaluation.
        let writers = self
            .materials()
            .iter()
            .filter(|m| m.declares_property(property));
        for writer in writers {
            for dep in writer.dependencies(property) {
                if !coupled.contains(&dep.as_str()) {
                    return Err(ResolveError::IncompleteCoupling {
                        property: property.to_string(),
                        variable: dep,
                        region: PropertyLayout::region(self),
                    });
                }
            }
        }
        Ok(())
    }
}
