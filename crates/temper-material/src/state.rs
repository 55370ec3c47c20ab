//! Double-buffered per-element storage for stateful properties.
//!
//! [`StatefulStore`] keeps a "current" and an "old" value per element
//! and quadrature point. Materials read `old` and write `current` during
//! a step; [`StatefulStore::advance`] promotes current to old once the
//! step has converged. Re-evaluating an element within a step (e.g. on
//! every nonlinear iteration) always starts from the same old values.

use indexmap::IndexMap;
use temper_core::ElementId;

/// Current/old quadrature point values for one stateful property.
#[derive(Debug, Clone)]
pub struct StatefulStore {
    current: IndexMap<ElementId, Vec<f64>>,
    old: IndexMap<ElementId, Vec<f64>>,
    initial: f64,
    generation: u64,
}

impl StatefulStore {
    /// Create an empty store. Points never written read as `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            current: IndexMap::new(),
            old: IndexMap::new(),
            initial,
            generation: 0,
        }
    }

    /// Old value at `(element, qp)`.
    pub fn old(&self, element: ElementId, qp: usize) -> f64 {
        self.old
            .get(&element)
            .and_then(|vals| vals.get(qp).copied())
            .unwrap_or(self.initial)
    }

    /// Current value at `(element, qp)`, falling back to the old value
    /// if nothing has been written this step.
    pub fn current(&self, element: ElementId, qp: usize) -> f64 {
        self.current
            .get(&element)
            .and_then(|vals| vals.get(qp).copied())
            .unwrap_or_else(|| self.old(element, qp))
    }

    /// Store the current value at `(element, qp)`.
    pub fn set(&mut self, element: ElementId, qp: usize, value: f64) {
        let initial = self.initial;
        let vals = self.current.entry(element).or_default();
        if vals.len() <= qp {
            vals.resize(qp + 1, initial);
        }
        vals[qp] = value;
    }

    /// Promote current values to old. Elements not written this step
    /// keep their old values.
    pub fn advance(&mut self) {
        for (element, vals) in self.current.drain(..) {
            self.old.insert(element, vals);
        }
        self.generation += 1;
    }

    /// Number of completed [`advance`](Self::advance) calls.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of elements with stored old values.
    pub fn len(&self) -> usize {
        self.old.len()
    }

    /// Whether no element has stored old values.
    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }
}
