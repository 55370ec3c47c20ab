//! Name-to-index table for nonlinear variables.

use indexmap::IndexMap;

use crate::id::VarId;

/// Maps variable names to global [`VarId`]s and back.
///
/// IDs are handed out sequentially in insertion order, mirroring how the
/// DOF system numbers nonlinear variables. Adding an existing name
/// returns its existing ID.
#[derive(Clone, Debug, Default)]
pub struct VariableTable {
    ids: IndexMap<String, VarId>,
}

impl VariableTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning its ID.
    ///
    /// # Panics
    ///
    /// Panics if a new name would be the 2^32-th variable; [`VarId`]
    /// is 32 bits wide.
    pub fn add(&mut self, name: impl Into<String>) -> VarId {
        let entry = self.ids.entry(name.into());
        let next = VarId(u32::try_from(entry.index()).expect("variable count exceeds u32"));
        *entry.or_insert(next)
    }

    /// Look up the ID of a variable by name.
    pub fn id(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    /// Look up the name of a variable by ID.
    pub fn name(&self, id: VarId) -> Option<&str> {
        self.ids.get_index(id.0 as usize).map(|(name, _)| name.as_str())
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no variables are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(name, id)` pairs in numbering order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, VarId)> {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }
}

impl<S: Into<String>> FromIterator<S> for VariableTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for name in iter {
            table.add(name);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut vars = VariableTable::new();
        let u = vars.add("u");
        let v = vars.add("v");
        assert_eq!(u, VarId(0));
        assert_eq!(v, VarId(1));
        assert_eq!(vars.add("u"), u);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn lookup_both_directions() {
        let vars: VariableTable = ["u", "v", "w"].into_iter().collect();
        assert_eq!(vars.id("w"), Some(VarId(2)));
        assert_eq!(vars.name(VarId(1)), Some("v"));
        assert_eq!(vars.name(VarId(9)), None);
        assert_eq!(vars.id("T"), None);
    }
}
