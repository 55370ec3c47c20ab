//! Reusable material test fixtures.
//!
//! - [`CountingMaterial`]: counts `advance_state` calls.
//! - [`FailingMaterial`]: fails `advance_state` after N successes.
//! - [`FixedMaterial`]: writes fixed values for arbitrary keys, with
//!   configurable dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use temper_core::{MaterialError, PropertyKey};
use temper_material::{Material, MaterialHandle, PropertyWriter, QpContext};

/// Supplies nothing and counts how often its state was advanced.
///
/// Register it through [`CountingMaterial::handle`] to keep an `Arc`
/// for inspecting the count afterwards.
#[derive(Debug)]
pub struct CountingMaterial {
    pub name: String,
    advances: AtomicUsize,
}

impl CountingMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            advances: AtomicUsize::new(0),
        }
    }

    /// Wrap in an `Arc` and a handle sharing it.
    pub fn handle(name: impl Into<String>) -> (Arc<Self>, MaterialHandle) {
        let material = Arc::new(Self::new(name));
        let handle = MaterialHandle::from_arc(Arc::clone(&material));
        (material, handle)
    }

    /// Number of `advance_state` calls so far.
    pub fn advance_count(&self) -> usize {
        self.advances.load(Ordering::Relaxed)
    }
}

impl Material for CountingMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        Vec::new()
    }

    fn compute_qp(
        &self,
        _ctx: &QpContext<'_>,
        _out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        Ok(())
    }

    fn advance_state(&self) -> Result<(), MaterialError> {
        self.advances.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Advances successfully `succeed_count` times, then fails every call.
#[derive(Debug)]
pub struct FailingMaterial {
    pub name: String,
    succeed_count: usize,
    calls: AtomicUsize,
}

impl FailingMaterial {
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Material for FailingMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        Vec::new()
    }

    fn compute_qp(
        &self,
        _ctx: &QpContext<'_>,
        _out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        Ok(())
    }

    fn advance_state(&self) -> Result<(), MaterialError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            Err(MaterialError::ExecutionFailed {
                reason: format!("advance {n} failed (succeed_count={})", self.succeed_count),
            })
        } else {
            Ok(())
        }
    }
}

/// Writes a fixed value for each configured key at every point.
///
/// Useful for driving kernels with hand-picked derivative values, or
/// for leaving a derivative undeclared on purpose.
#[derive(Debug, Clone)]
pub struct FixedMaterial {
    pub name: String,
    outputs: Vec<(PropertyKey, f64)>,
    dependencies: Vec<(String, Vec<String>)>,
}

impl FixedMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Supply `key` with a constant `value`.
    pub fn supply(mut self, key: PropertyKey, value: f64) -> Self {
        self.outputs.push((key, value));
        self
    }

    /// Declare that `property` depends on `vars`.
    pub fn depends_on(mut self, property: impl Into<String>, vars: &[&str]) -> Self {
        self.dependencies.push((
            property.into(),
            vars.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }
}

impl Material for FixedMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn supplies(&self) -> Vec<PropertyKey> {
        self.outputs.iter().map(|(k, _)| k.clone()).collect()
    }

    fn dependencies(&self, property: &str) -> Vec<String> {
        self.dependencies
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, vars)| vars.clone())
            .unwrap_or_default()
    }

    fn compute_qp(
        &self,
        _ctx: &QpContext<'_>,
        out: &mut PropertyWriter<'_>,
    ) -> Result<(), MaterialError> {
        for (i, (_, value)) in self.outputs.iter().enumerate() {
            out.set(i, *value)?;
        }
        Ok(())
    }
}
