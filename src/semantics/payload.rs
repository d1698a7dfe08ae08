use serde::Serialize;

use crate::document::{CityObjectData, SEMANTIC_SURFACES_KEY};

use super::registry::{SurfaceEntry, SurfaceRegistry};
use super::UNBOUND;

/// Serializable semantics block for one object.
///
/// The exchange shape the host persists on export: the surface records
/// plus one entry index per mesh face, `-1` for unbound faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticsPayload {
    /// Surface records in registry order.
    pub surfaces: Vec<SurfaceEntry>,
    /// One semantic index per face, aligned with the mesh's face order.
    pub values: Vec<i64>,
}

impl SemanticsPayload {
    /// Collects the payload for an object.
    ///
    /// Face bindings are read through the same attribute-then-property
    /// fallback as assignment.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn collect(object: &CityObjectData) -> Self {
        let registry = SurfaceRegistry::load(object.properties.get(SEMANTIC_SURFACES_KEY));
        let values = (0..object.mesh.face_count() as u32)
            .map(|face| {
                object
                    .semantic_index(face)
                    .map_or(UNBOUND, i64::from)
            })
            .collect();

        Self {
            surfaces: registry.entries().to_vec(),
            values,
        }
    }
}
