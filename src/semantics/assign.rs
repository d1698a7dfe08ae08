use crate::document::{Document, ObjectId, SEMANTIC_SURFACES_KEY};
use crate::error::Result;

use super::binding::{AttributeLayer, BindingStore, FaceBindingStore, PropertyLayer};
use super::is_opening;
use super::registry::SurfaceRegistry;

/// Outcome of one surface assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the surface entry the face is now bound to.
    pub index: u32,
    /// `true` if the entry was appended by this call.
    pub created: bool,
}

/// Assigns a semantic surface type to one mesh face.
///
/// Each execution is a full read-modify-write of the object's persisted
/// surface list: load, mutate, write back, in one call. A pass over many
/// selected faces runs one `AssignSurface` per face, so faces committed
/// before an external abort stay committed.
pub struct AssignSurface {
    object: ObjectId,
    kind: String,
    face: u32,
}

impl AssignSurface {
    /// Creates a new `AssignSurface` operation.
    #[must_use]
    pub fn new(object: ObjectId, kind: impl Into<String>, face: u32) -> Self {
        Self {
            object,
            kind: kind.into(),
            face,
        }
    }

    /// Executes the assignment.
    ///
    /// Looks up or appends the entry for the chosen type, links opening
    /// types under their enclosing wall, binds the face, and marks the
    /// object dirty for downstream export.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the document. Binding
    /// store failures never propagate; the registry mutation is kept
    /// even when no backend accepts the face binding.
    pub fn execute(&self, document: &mut Document) -> Result<Assignment> {
        let object = document.object_mut(self.object)?;

        let mut registry = SurfaceRegistry::load(object.properties.get(SEMANTIC_SURFACES_KEY));

        object.ensure_semantic_attribute();
        let mut store = BindingStore::new(
            object.semantic_attribute.as_mut().map(AttributeLayer::new),
            PropertyLayer::new(&mut object.face_properties),
        );
        let assignment = assign_in(&mut registry, &mut store, &self.kind, self.face);

        object
            .properties
            .insert(SEMANTIC_SURFACES_KEY.to_string(), registry.to_value());
        object.dirty = true;

        Ok(assignment)
    }
}

/// Core assignment steps over any pair of binding backends.
///
/// Separated from the document plumbing so the dual-store paths are
/// exercised with substitutable fakes.
fn assign_in<P: FaceBindingStore, F: FaceBindingStore>(
    registry: &mut SurfaceRegistry,
    store: &mut BindingStore<P, F>,
    kind: &str,
    face: u32,
) -> Assignment {
    let old_index = store.resolve_index(face);

    let (index, created) = registry.find_or_append(kind);

    if is_opening(kind) {
        if let Some(parent) = registry.find_parent_wall(old_index) {
            registry.link_opening(index, parent);
        }
    }

    if let Err(error) = store.write_index(face, index) {
        // Tolerated: the face stays unbound for lookups, the registry
        // mutation stands.
        tracing::warn!(%error, face, "face binding not persisted");
    }

    Assignment { index, created }
}
