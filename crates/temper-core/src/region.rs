//! The three region identifier spaces.

use std::fmt;

use crate::id::{BoundaryId, SubdomainId};

/// Which identifier space a [`Region`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Interior subdomain.
    Block,
    /// Boundary face.
    Boundary,
    /// Neighbor side of an interior face (DG coupling).
    Neighbor,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Boundary => write!(f, "boundary"),
            Self::Neighbor => write!(f, "neighbor boundary"),
        }
    }
}

/// A region over which materials are scoped.
///
/// `Boundary(b)` and `Neighbor(b)` share the [`BoundaryId`] type but are
/// distinct regions: a material registered on one is never visible
/// through the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// An interior subdomain.
    Block(SubdomainId),
    /// A boundary segment.
    Boundary(BoundaryId),
    /// The neighbor side of a boundary face.
    Neighbor(BoundaryId),
}

impl Region {
    /// The identifier space this region lives in.
    pub fn kind(&self) -> RegionKind {
        match self {
            Self::Block(_) => RegionKind::Block,
            Self::Boundary(_) => RegionKind::Boundary,
            Self::Neighbor(_) => RegionKind::Neighbor,
        }
    }
}

impl From<SubdomainId> for Region {
    fn from(id: SubdomainId) -> Self {
        Self::Block(id)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(id) => write!(f, "block {id}"),
            Self::Boundary(id) => write!(f, "boundary {id}"),
            Self::Neighbor(id) => write!(f, "neighbor boundary {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_and_neighbor_are_distinct() {
        let b = Region::Boundary(BoundaryId(2));
        let n = Region::Neighbor(BoundaryId(2));
        assert_ne!(b, n);
        assert_eq!(b.kind(), RegionKind::Boundary);
        assert_eq!(n.kind(), RegionKind::Neighbor);
    }

    #[test]
    fn display_names_the_space() {
        assert_eq!(Region::Block(SubdomainId(1)).to_string(), "block 1");
        assert_eq!(
            Region::Neighbor(BoundaryId(4)).to_string(),
            "neighbor boundary 4"
        );
    }
}
