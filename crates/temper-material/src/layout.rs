//! Slot assignment for a region's material collection.
//!
//! [`PropertyLayout::build`] runs once per region at setup. It walks the
//! collection in evaluation order and gives every declared
//! [`PropertyKey`] a [`PropertySlot`], plus one extra slot that always
//! holds zeros. Consumers resolve names to slots once; per-element code
//! indexes [`PropertyBuffers`](crate::PropertyBuffers) by slot.

use indexmap::IndexMap;
use temper_core::{LayoutId, PropertyKey, Region};

use crate::material::MaterialHandle;

/// Index of a per-quadrature-point array inside
/// [`PropertyBuffers`](crate::PropertyBuffers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertySlot(pub(crate) usize);

impl PropertySlot {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Precomputed mapping from property keys to buffer slots for one region.
#[derive(Debug, Clone)]
#[must_use]
pub struct PropertyLayout {
    id: LayoutId,
    region: Region,
    materials: Vec<MaterialHandle>,
    /// `slots[key]` is the index of the material that first declared it.
    slots: IndexMap<PropertyKey, usize>,
    /// `outputs[material][i]` is the slot of that material's i-th output.
    outputs: Vec<Vec<usize>>,
}

impl PropertyLayout {
    /// Assign slots for every output of `materials`, in collection order.
    ///
    /// A key declared by several materials shares one slot; the first
    /// declarer is recorded as owner and later declarers overwrite its
    /// values during evaluation. Detecting such overlap is left to the
    /// caller.
    pub fn build(region: Region, materials: &[MaterialHandle]) -> Self {
        let mut slots: IndexMap<PropertyKey, usize> = IndexMap::new();
        let mut outputs = Vec::with_capacity(materials.len());

        for (m, material) in materials.iter().enumerate() {
            let supplied = material.supplies();
            let mut material_outputs = Vec::with_capacity(supplied.len());
            for key in supplied {
                let entry = slots.entry(key);
                let slot = entry.index();
                entry.or_insert(m);
                material_outputs.push(slot);
            }
            outputs.push(material_outputs);
        }

        let id = LayoutId::next();
        tracing::debug!(
            %region,
            layout = %id,
            materials = materials.len(),
            slots = slots.len(),
            "built property layout"
        );

        Self {
            id,
            region,
            materials: materials.to_vec(),
            slots,
            outputs,
        }
    }

    /// Identity of this layout. Clones share it; every
    /// [`build`](Self::build) allocates a fresh one.
    pub fn id(&self) -> LayoutId {
        self.id
    }

    /// Region the layout was built for.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Materials in evaluation order.
    pub fn materials(&self) -> &[MaterialHandle] {
        &self.materials
    }

    /// Number of property slots, excluding the zero slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no material declares any output.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot assigned to `key`, if any material declares it.
    pub fn slot(&self, key: &PropertyKey) -> Option<PropertySlot> {
        self.slots.get_index_of(key).map(PropertySlot)
    }

    /// The slot that always reads as zeros.
    pub fn zero_slot(&self) -> PropertySlot {
        PropertySlot(self.slots.len())
    }

    /// The material that owns the value of `property`: the first in
    /// evaluation order to declare it.
    pub fn owner(&self, property: &str) -> Option<&MaterialHandle> {
        self.slots
            .get(&PropertyKey::value(property))
            .map(|&m| &self.materials[m])
    }

    /// Key stored at `slot`; `None` for the zero slot.
    pub fn key(&self, slot: PropertySlot) -> Option<&PropertyKey> {
        self.slots.get_index(slot.0).map(|(key, _)| key)
    }

    /// Output-to-slot table for the material at `index` in evaluation order.
    pub(crate) fn outputs(&self, index: usize) -> &[usize] {
        &self.outputs[index]
    }
}
