mod flatten;

pub use flatten::{FlatPolygon, FlattenBoundaries};

use serde::Deserialize;
use serde_json::Value;

/// Tag of a boundary geometry record.
///
/// Only `Solid` and `MultiSurface` have a fixed nesting depth; every
/// other tag deserializes to `Other` and is traversed permissively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GeometryKind {
    /// Shells of faces of rings.
    Solid,
    /// Faces of rings, no shell level.
    MultiSurface,
    /// Unrecognized tag; nesting depth is not trusted.
    #[serde(other)]
    Other,
}

/// One geometry record of a city object.
///
/// `boundaries` is kept as raw JSON: the exchange format nests arrays to
/// a depth that depends on the tag, and malformed nodes must survive
/// deserialization so they can be skipped individually later.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Geometry tag (`Solid`, `MultiSurface`, or anything else).
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    /// Nested boundary arrays; missing data flattens to nothing.
    #[serde(default)]
    pub boundaries: Value,
}
