mod import;

pub use import::{CityObject, ImportObject};

use std::collections::HashMap;

use serde_json::Value;
use slotmap::SlotMap;

use crate::error::DocumentError;
use crate::math::Point3;
use crate::mesh::PolygonMesh;
use crate::semantics::{surface_types_for, UNBOUND};

slotmap::new_key_type! {
    /// Unique identifier for a city object in a document.
    pub struct ObjectId;
}

/// Well-known object property key holding the persisted surface list.
pub const SEMANTIC_SURFACES_KEY: &str = "semantic_surfaces";

/// Per-document state: the global vertex pool plus every imported object.
///
/// Boundary geometry references the pool by integer index; the pool is
/// read-only once the document exists.
#[derive(Debug, Default)]
pub struct Document {
    vertices: Vec<Point3>,
    objects: SlotMap<ObjectId, CityObjectData>,
}

impl Document {
    /// Creates a document over a global vertex pool.
    #[must_use]
    pub fn new(vertices: Vec<Point3>) -> Self {
        Self {
            vertices,
            objects: SlotMap::default(),
        }
    }

    /// The document-wide vertex pool shared by all boundary geometry.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Registers an object and returns its ID.
    pub fn add_object(&mut self, data: CityObjectData) -> ObjectId {
        self.objects.insert(data)
    }

    /// Returns a reference to the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the document.
    pub fn object(&self, id: ObjectId) -> Result<&CityObjectData, DocumentError> {
        self.objects.get(id).ok_or(DocumentError::ObjectNotFound)
    }

    /// Returns a mutable reference to the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the document.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut CityObjectData, DocumentError> {
        self.objects
            .get_mut(id)
            .ok_or(DocumentError::ObjectNotFound)
    }

    /// Iterates over all objects in the document.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &CityObjectData)> {
        self.objects.iter()
    }

    /// Selectable surface type names for an object's declared feature type.
    ///
    /// This is what the UI enumerates before invoking assignment; both
    /// error cases are presented to the user as instructional messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the document or has no
    /// feature type set.
    pub fn surface_types(&self, id: ObjectId) -> Result<&'static [&'static str], DocumentError> {
        let object = self.object(id)?;
        let feature_type = object
            .feature_type
            .as_deref()
            .ok_or(DocumentError::MissingFeatureType)?;
        Ok(surface_types_for(feature_type))
    }
}

/// Data associated with one imported city object.
#[derive(Debug, Clone)]
pub struct CityObjectData {
    /// Host-visible object name (the exchange-format object id).
    pub name: String,
    /// Declared root feature type (e.g. `Building`), if any.
    pub feature_type: Option<String>,
    /// Compact polygon mesh produced at import.
    pub mesh: PolygonMesh,
    /// `false` routes all face bindings through the legacy property map.
    pub supports_face_attributes: bool,
    /// Typed per-face semantic attribute layer, created on first use.
    pub semantic_attribute: Option<Vec<i64>>,
    /// Legacy ad hoc per-face properties.
    pub face_properties: HashMap<u32, i64>,
    /// Persisted object properties, keyed by well-known names.
    pub properties: serde_json::Map<String, Value>,
    /// Set whenever semantic state changes; cleared by the host after
    /// export.
    pub dirty: bool,
}

impl CityObjectData {
    /// Creates object data around an imported mesh.
    #[must_use]
    pub fn new(name: impl Into<String>, feature_type: Option<String>, mesh: PolygonMesh) -> Self {
        Self {
            name: name.into(),
            feature_type,
            mesh,
            supports_face_attributes: true,
            semantic_attribute: None,
            face_properties: HashMap::new(),
            properties: serde_json::Map::new(),
            dirty: false,
        }
    }

    /// Semantic index bound to `face`.
    ///
    /// Reads the attribute layer first and the legacy properties second;
    /// `-1` and absence both mean unbound.
    #[must_use]
    pub fn semantic_index(&self, face: u32) -> Option<u32> {
        let raw = self
            .semantic_attribute
            .as_ref()
            .and_then(|layer| layer.get(face as usize).copied())
            .or_else(|| self.face_properties.get(&face).copied());
        raw.and_then(|value| u32::try_from(value).ok())
    }

    /// Creates the typed attribute layer on first use, sized to the
    /// mesh's face count and filled with the unbound sentinel. Hosts
    /// without face-attribute support never get a layer.
    pub(crate) fn ensure_semantic_attribute(&mut self) {
        if self.supports_face_attributes && self.semantic_attribute.is_none() {
            self.semantic_attribute = Some(vec![UNBOUND; self.mesh.face_count()]);
        }
    }
}
