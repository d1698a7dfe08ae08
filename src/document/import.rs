use serde::Deserialize;

use crate::boundary::{FlatPolygon, FlattenBoundaries, Geometry};
use crate::mesh::BuildMesh;

use super::{CityObjectData, Document, ObjectId};

/// One city object record from the exchange format.
#[derive(Debug, Clone, Deserialize)]
pub struct CityObject {
    /// Declared root feature type (e.g. `Building`).
    #[serde(rename = "type")]
    pub feature_type: Option<String>,
    /// Geometry records; all of them feed one mesh at import.
    #[serde(default)]
    pub geometry: Vec<Geometry>,
}

/// Imports one city object into a document.
///
/// Flattens every geometry record, in order, into a single compact mesh
/// and registers the object. An object without geometry imports with an
/// empty mesh, not an error.
pub struct ImportObject<'a> {
    name: &'a str,
    object: &'a CityObject,
}

impl<'a> ImportObject<'a> {
    /// Creates a new `ImportObject` operation.
    #[must_use]
    pub fn new(name: &'a str, object: &'a CityObject) -> Self {
        Self { name, object }
    }

    /// Executes the import, returning the new object's ID.
    pub fn execute(&self, document: &mut Document) -> ObjectId {
        let mut polygons: Vec<FlatPolygon<'a>> = Vec::new();
        for geometry in &self.object.geometry {
            polygons.extend(FlattenBoundaries::new(geometry).execute());
        }

        let mesh = BuildMesh::new(document.vertices(), &polygons).execute();
        tracing::debug!(
            name = self.name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "imported object"
        );

        document.add_object(CityObjectData::new(
            self.name,
            self.object.feature_type.clone(),
            mesh,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use crate::math::Point3;

    use super::*;

    fn pool() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn geometry_records_concatenate_into_one_mesh() {
        let object: CityObject = serde_json::from_value(json!({
            "type": "Building",
            "geometry": [
                { "type": "MultiSurface", "boundaries": [[[0, 1, 2]]] },
                { "type": "MultiSurface", "boundaries": [[[0, 2, 3]]] },
            ],
        }))
        .unwrap();
        let mut document = Document::new(pool());

        let id = ImportObject::new("b1", &object).execute(&mut document);

        let data = document.object(id).unwrap();
        assert_eq!(data.mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
        // Vertices shared between the two records deduplicate.
        assert_eq!(data.mesh.vertex_count(), 4);
        assert_eq!(data.feature_type.as_deref(), Some("Building"));
    }

    #[test]
    fn object_without_geometry_imports_empty() {
        let object: CityObject = serde_json::from_value(json!({ "type": "Building" })).unwrap();
        let mut document = Document::new(pool());

        let id = ImportObject::new("b1", &object).execute(&mut document);

        assert!(document.object(id).unwrap().mesh.is_empty());
    }
}
