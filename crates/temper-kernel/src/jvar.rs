//! Global variable index to local coupling index map.

use temper_core::VarId;

use crate::error::KernelError;

/// Maps a global [`VarId`] to its position in a kernel's coupling list.
///
/// Dense: one entry per global index up to the largest coupled one, so
/// lookup is a bounds check and an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JvarMap {
    map: Vec<Option<usize>>,
    coupled: Vec<VarId>,
}

impl JvarMap {
    /// Build the map for `coupled`, in coupling order.
    ///
    /// A variable listed twice keeps its first local index.
    pub fn new(coupled: &[VarId]) -> Self {
        let size = coupled.iter().map(|v| v.0 as usize + 1).max().unwrap_or(0);
        let mut map = vec![None; size];
        for (cvar, var) in coupled.iter().enumerate() {
            map[var.0 as usize].get_or_insert(cvar);
        }
        Self {
            map,
            coupled: coupled.to_vec(),
        }
    }

    /// Local coupling index of `jvar`, or `None` if not coupled.
    #[inline]
    pub fn get(&self, jvar: VarId) -> Option<usize> {
        self.map.get(jvar.0 as usize).copied().flatten()
    }

    /// Local coupling index of `jvar`.
    pub fn map(&self, jvar: VarId) -> Result<usize, KernelError> {
        self.get(jvar).ok_or(KernelError::UnmappedVariable { jvar })
    }

    /// Coupled variables in local index order.
    pub fn coupled(&self) -> &[VarId] {
        &self.coupled
    }

    /// Number of coupled variables.
    pub fn len(&self) -> usize {
        self.coupled.len()
    }

    /// Whether nothing is coupled.
    pub fn is_empty(&self) -> bool {
        self.coupled.is_empty()
    }
}
