use serde_json::Value;

use super::{Geometry, GeometryKind};

/// One flat polygon: the vertex-index nodes of a single ring.
///
/// Nodes stay as raw JSON values; the mesh builder resolves them against
/// the vertex pool one at a time, so a malformed node costs only itself.
pub type FlatPolygon<'a> = &'a [Value];

/// Flattens a nested boundary structure into a flat polygon sequence.
///
/// Output order follows traversal order. Re-running the operation yields
/// the same sequence.
pub struct FlattenBoundaries<'a> {
    geometry: &'a Geometry,
}

impl<'a> FlattenBoundaries<'a> {
    /// Creates a new `FlattenBoundaries` operation.
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Executes the flattening, returning one polygon per emitted ring.
    ///
    /// For `Solid` and `MultiSurface` only outer rings are emitted; holes
    /// are dropped so faces stay one-to-one with semantic slots. For
    /// unrecognized tags every ring is emitted. Missing or malformed
    /// boundary nodes are skipped, never an error.
    #[must_use]
    pub fn execute(&self) -> Vec<FlatPolygon<'a>> {
        let mut polygons = Vec::new();
        let Some(boundaries) = self.geometry.boundaries.as_array() else {
            return polygons;
        };

        match self.geometry.kind {
            GeometryKind::Solid => {
                for shell in boundaries {
                    let Some(faces) = shell.as_array() else {
                        tracing::debug!("skipping non-array shell node");
                        continue;
                    };
                    for face in faces {
                        if let Some(outer) = outer_ring(face) {
                            polygons.push(outer);
                        }
                    }
                }
            }
            GeometryKind::MultiSurface => {
                for face in boundaries {
                    if let Some(outer) = outer_ring(face) {
                        polygons.push(outer);
                    }
                }
            }
            GeometryKind::Other => {
                for face in boundaries {
                    let Some(nodes) = face.as_array() else {
                        tracing::debug!("skipping non-array face node");
                        continue;
                    };
                    let Some(first) = nodes.first() else {
                        continue;
                    };
                    if first.is_array() {
                        // Multi-ring face under an unknown tag: emit every
                        // ring, holes included.
                        for ring in nodes {
                            if let Some(ring) = ring.as_array() {
                                if !ring.is_empty() {
                                    polygons.push(ring.as_slice());
                                }
                            }
                        }
                    } else {
                        polygons.push(nodes.as_slice());
                    }
                }
            }
        }

        polygons
    }
}

/// Outer ring of a face node: the first element if the face is a ring
/// list, the face itself otherwise. Empty faces and rings yield `None`.
fn outer_ring(face: &Value) -> Option<&[Value]> {
    let nodes = face.as_array()?;
    let first = nodes.first()?;
    if let Some(ring) = first.as_array() {
        if ring.is_empty() {
            None
        } else {
            Some(ring.as_slice())
        }
    } else {
        Some(nodes.as_slice())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn geometry(kind: &str, boundaries: Value) -> Geometry {
        serde_json::from_value(json!({ "type": kind, "boundaries": boundaries })).unwrap()
    }

    fn indices(polygon: FlatPolygon<'_>) -> Vec<u64> {
        polygon.iter().map(|node| node.as_u64().unwrap()).collect()
    }

    // ── Solid ──

    #[test]
    fn solid_emits_outer_rings_only() {
        // Two shells, one triangular face each; the second face carries a
        // hole ring that must never appear in the output.
        let geometry = geometry(
            "Solid",
            json!([
                [[[0, 1, 2]]],
                [[[3, 4, 5], [6, 7, 8]]],
            ]),
        );

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 2);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2]);
        assert_eq!(indices(polygons[1]), vec![3, 4, 5]);
    }

    #[test]
    fn solid_skips_empty_faces() {
        let geometry = geometry("Solid", json!([[[], [[0, 1, 2]]]]));

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 1);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2]);
    }

    #[test]
    fn solid_skips_non_array_shells() {
        let geometry = geometry("Solid", json!([42, [[[0, 1, 2]]]]));

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn solid_accepts_flat_face_without_ring_nesting() {
        let geometry = geometry("Solid", json!([[[0, 1, 2, 3]]]));

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 1);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2, 3]);
    }

    // ── MultiSurface ──

    #[test]
    fn multisurface_emits_outer_rings_only() {
        let geometry = geometry(
            "MultiSurface",
            json!([[[0, 1, 2], [3, 4, 5]], [[6, 7, 8]]]),
        );

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 2);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2]);
        assert_eq!(indices(polygons[1]), vec![6, 7, 8]);
    }

    // ── Other ──

    #[test]
    fn unknown_tag_emits_every_ring() {
        let geometry = geometry(
            "CompositeSurface",
            json!([[[0, 1, 2], [3, 4, 5]]]),
        );

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 2);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2]);
        assert_eq!(indices(polygons[1]), vec![3, 4, 5]);
    }

    #[test]
    fn unknown_tag_emits_flat_face_as_one_polygon() {
        let geometry = geometry("CompositeSurface", json!([[0, 1, 2, 3]]));

        let polygons = FlattenBoundaries::new(&geometry).execute();

        assert_eq!(polygons.len(), 1);
        assert_eq!(indices(polygons[0]), vec![0, 1, 2, 3]);
    }

    // ── Degenerate input ──

    #[test]
    fn missing_boundaries_yield_empty_sequence() {
        let geometry: Geometry = serde_json::from_value(json!({ "type": "Solid" })).unwrap();

        assert!(FlattenBoundaries::new(&geometry).execute().is_empty());
    }

    #[test]
    fn restarting_yields_the_same_sequence() {
        let geometry = geometry("MultiSurface", json!([[[0, 1, 2]]]));
        let op = FlattenBoundaries::new(&geometry);

        assert_eq!(op.execute(), op.execute());
    }
}
