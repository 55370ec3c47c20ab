//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies a mesh subdomain ("block").
///
/// Block and boundary identifiers live in separate spaces; the type
/// split keeps a boundary tag from ever being used as a block tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubdomainId(pub u32);

impl fmt::Display for SubdomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubdomainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a boundary segment (sideset).
///
/// Used both for boundary materials and for the neighbor side of an
/// interior face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundaryId(pub u32);

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BoundaryId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Global index of a nonlinear variable, as numbered by the DOF system.
///
/// `VarId(n)` corresponds to the n-th entry of a
/// [`VariableTable`](crate::VariableTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VarId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a mesh element. Used to key per-element stateful storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identity of a shared material instance.
///
/// Derived from the address of the shared allocation, so every handle
/// wrapping the same `Arc` carries the same ID however it was built,
/// and two live instances never compare equal even if they are
/// configured identically. This is what lets the warehouse recognise
/// one material registered under several regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MaterialId {
    /// The ID of the instance behind `shared`.
    pub fn of<T: ?Sized>(shared: &Arc<T>) -> Self {
        Self(Arc::as_ptr(shared).cast::<()>() as usize)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Counter for unique [`LayoutId`] allocation.
static LAYOUT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one built property layout.
///
/// Allocated from a monotonic atomic counter via [`LayoutId::next`].
/// Property buffers and resolved slots remember the layout they came
/// from so a consumer set up against one region cannot read another
/// region's buffers by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(u64);

impl LayoutId {
    /// Allocate a fresh, unique layout ID. Thread-safe.
    pub fn next() -> Self {
        Self(LAYOUT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
