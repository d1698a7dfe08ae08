use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::Value;

use crate::boundary::FlatPolygon;
use crate::math::{coord_key, Point3};

use super::PolygonMesh;

/// Builds a compact mesh buffer from flattened polygons.
///
/// Each polygon node is resolved against the global vertex pool; nodes
/// that are malformed or out of range are skipped one at a time without
/// aborting the polygon. Faces that end up with fewer than three entries
/// after resolution are dropped.
pub struct BuildMesh<'a> {
    pool: &'a [Point3],
    polygons: &'a [FlatPolygon<'a>],
}

impl<'a> BuildMesh<'a> {
    /// Creates a new `BuildMesh` operation.
    #[must_use]
    pub fn new(pool: &'a [Point3], polygons: &'a [FlatPolygon<'a>]) -> Self {
        Self { pool, polygons }
    }

    /// Executes the build, returning the deduplicated mesh buffer.
    ///
    /// Deterministic for a fixed polygon order: vertices appear in
    /// first-seen order and faces are never sorted or reordered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> PolygonMesh {
        let mut mesh = PolygonMesh::default();
        let mut local_index: HashMap<[u64; 3], u32> = HashMap::new();

        for polygon in self.polygons {
            let mut face = Vec::with_capacity(polygon.len());
            for node in *polygon {
                let Some(point) = self.resolve(node) else {
                    tracing::debug!(%node, "skipping unresolvable vertex node");
                    continue;
                };
                let index = match local_index.entry(coord_key(&point)) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let index = mesh.vertices.len() as u32;
                        mesh.vertices.push(point);
                        *entry.insert(index)
                    }
                };
                face.push(index);
            }
            // Repeats count: a triangle with a doubled vertex keeps its
            // three entries, while a face cut down by skipped nodes is
            // dropped.
            if face.len() >= 3 {
                mesh.faces.push(face);
            }
        }

        mesh
    }

    /// Resolves one vertex-index node against the pool.
    ///
    /// `None` for non-integer nodes and indices beyond the pool.
    fn resolve(&self, node: &Value) -> Option<Point3> {
        let index = usize::try_from(node.as_u64()?).ok()?;
        self.pool.get(index).copied()
    }
}
