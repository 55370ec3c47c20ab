//! Region-indexed material storage.
//!
//! [`MaterialWarehouse`] keeps three independent maps, one per
//! [`RegionKind`](temper_core::RegionKind), from region identifier to an
//! ordered material collection. Registration takes `&mut self` and
//! queries take `&self`, so the borrow checker keeps the setup phase and
//! the assembly phase apart.
//!
//! # Lookup policy
//!
//! [`materials`](MaterialWarehouse::materials) returns an empty slice for
//! a region with nothing registered and never inserts on read.
//! [`try_materials`](MaterialWarehouse::try_materials) is the strict
//! variant and fails with [`RegistryError::UnknownRegion`].

use indexmap::IndexMap;
use temper_core::{BoundaryId, MaterialId, Region, RegistryError, SubdomainId};

use crate::layout::PropertyLayout;
use crate::material::MaterialHandle;

/// Owner of the per-region material collections.
#[derive(Debug, Default)]
pub struct MaterialWarehouse {
    block: IndexMap<SubdomainId, Vec<MaterialHandle>>,
    boundary: IndexMap<BoundaryId, Vec<MaterialHandle>>,
    neighbor: IndexMap<BoundaryId, Vec<MaterialHandle>>,
    /// Every distinct material, in first-registration order.
    distinct: IndexMap<MaterialId, MaterialHandle>,
}

impl MaterialWarehouse {
    /// Create an empty warehouse.
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, region: Region) -> Option<&Vec<MaterialHandle>> {
        match region {
            Region::Block(id) => self.block.get(&id),
            Region::Boundary(id) => self.boundary.get(&id),
            Region::Neighbor(id) => self.neighbor.get(&id),
        }
    }

    /// Whether `region` has at least one material.
    pub fn has_materials(&self, region: Region) -> bool {
        self.collection(region).is_some_and(|c| !c.is_empty())
    }

    /// Materials on `region`, in evaluation order. Empty if none.
    pub fn materials(&self, region: Region) -> &[MaterialHandle] {
        self.collection(region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Materials on `region`, failing if nothing was ever registered there.
    pub fn try_materials(&self, region: Region) -> Result<&[MaterialHandle], RegistryError> {
        self.collection(region)
            .map(Vec::as_slice)
            .ok_or(RegistryError::UnknownRegion { region })
    }

    /// Append `material` to the collection for `region`.
    ///
    /// Order is preserved. No de-duplication is done within a collection;
    /// registering the same handle on several regions is expected and is
    /// tracked so that [`advance_state`](Self::advance_state) reaches it
    /// once.
    pub fn add_material(&mut self, region: Region, material: MaterialHandle) {
        tracing::debug!(
            %region,
            material = material.name(),
            id = %material.id(),
            "adding material"
        );
        self.distinct
            .entry(material.id())
            .or_insert_with(|| material.clone());
        match region {
            Region::Block(id) => self.block.entry(id).or_default().push(material),
            Region::Boundary(id) => self.boundary.entry(id).or_default().push(material),
            Region::Neighbor(id) => self.neighbor.entry(id).or_default().push(material),
        }
    }

    /// Advance every distinct material's state exactly once.
    ///
    /// Materials are visited in first-registration order. On the first
    /// failure the broadcast stops and [`RegistryError::StateAdvance`]
    /// reports the failing material and how many were already advanced.
    /// Must only be called while no assembly is running.
    ///
    /// Returns the number of materials advanced.
    pub fn advance_state(&self) -> Result<usize, RegistryError> {
        for (advanced, material) in self.distinct.values().enumerate() {
            if let Err(reason) = material.advance_state() {
                tracing::warn!(
                    material = material.name(),
                    advanced,
                    error = %reason,
                    "state advance aborted"
                );
                return Err(RegistryError::StateAdvance {
                    material: material.name().to_string(),
                    advanced,
                    reason,
                });
            }
        }
        tracing::debug!(materials = self.distinct.len(), "advanced material state");
        Ok(self.distinct.len())
    }

    /// Iterate block collections in first-registration order.
    ///
    /// Each call starts a fresh traversal.
    pub fn active_materials(&self) -> ActiveMaterials<'_> {
        ActiveMaterials {
            inner: self.block.iter(),
        }
    }

    /// Every distinct material, in first-registration order.
    pub fn distinct_materials(&self) -> impl Iterator<Item = &MaterialHandle> {
        self.distinct.values()
    }

    /// Number of distinct materials across all regions.
    pub fn material_count(&self) -> usize {
        self.distinct.len()
    }

    /// Build the property layout for `region`'s current collection.
    ///
    /// Every call builds a new layout with its own
    /// [`LayoutId`](temper_core::LayoutId); build once per region and
    /// share it between kernel setup and evaluation.
    pub fn layout(&self, region: Region) -> PropertyLayout {
        PropertyLayout::build(region, self.materials(region))
    }
}

/// Iterator over `(block, materials)` pairs, from
/// [`MaterialWarehouse::active_materials`].
pub struct ActiveMaterials<'a> {
    inner: indexmap::map::Iter<'a, SubdomainId, Vec<MaterialHandle>>,
}

impl<'a> Iterator for ActiveMaterials<'a> {
    type Item = (SubdomainId, &'a [MaterialHandle]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&id, c)| (id, c.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ActiveMaterials<'_> {}
