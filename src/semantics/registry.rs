use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WALL_SURFACE_SUFFIX;

/// One named semantic surface.
///
/// An entry's position in the registry list is its stable semantic
/// index: entries are only ever appended, never removed or reordered, so
/// per-face bindings stay valid for the registry's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceEntry {
    /// Surface type name, e.g. `WallSurface` or `Window`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Index of the enclosing wall entry, for opening surfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,
    /// Indices of child opening entries, in insertion order, no repeats.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u32>,
}

impl SurfaceEntry {
    /// Creates an entry with no parent and no children.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// `true` if this entry can parent an opening surface.
    #[must_use]
    pub fn is_wall(&self) -> bool {
        self.kind.ends_with(WALL_SURFACE_SUFFIX)
    }
}

/// Append-only surface list for one object.
///
/// The registry owns the persisted list for the duration of one
/// read-modify-write pass: load it from the stored property value,
/// mutate it, then write [`SurfaceRegistry::to_value`] back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceRegistry {
    entries: Vec<SurfaceEntry>,
}

impl SurfaceRegistry {
    /// Loads the registry from a persisted property value.
    ///
    /// A missing or null value yields an empty registry. A value that
    /// fails to deserialize also yields an empty registry with a warning;
    /// within a session the registry only writes well-formed records, so
    /// this arises only from host-side corruption.
    #[must_use]
    pub fn load(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        if value.is_null() {
            return Self::default();
        }
        match serde_json::from_value(value.clone()) {
            Ok(entries) => Self { entries },
            Err(error) => {
                tracing::warn!(%error, "discarding malformed surface list");
                Self::default()
            }
        }
    }

    /// Serializes the registry for write-back to the property store.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|error| {
            tracing::warn!(%error, "surface list failed to serialize");
            Value::Array(Vec::new())
        })
    }

    /// The entries in index order.
    #[must_use]
    pub fn entries(&self) -> &[SurfaceEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no entry has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry with the given type, if present.
    #[must_use]
    pub fn find(&self, kind: &str) -> Option<u32> {
        self.entries
            .iter()
            .position(|entry| entry.kind == kind)
            .map(index_of)
    }

    /// Finds the entry for `kind`, appending one if absent.
    ///
    /// Returns the entry's index and whether it was created by this call.
    /// At most one entry per distinct type ever exists.
    pub fn find_or_append(&mut self, kind: &str) -> (u32, bool) {
        if let Some(index) = self.find(kind) {
            return (index, false);
        }
        let index = index_of(self.entries.len());
        self.entries.push(SurfaceEntry::new(kind));
        (index, true)
    }

    /// Wall entry to parent an opening onto.
    ///
    /// Prefers `preferred` when it points at a wall-kind entry, otherwise
    /// the first wall-kind entry in the list; `None` when no wall exists.
    #[must_use]
    pub fn find_parent_wall(&self, preferred: Option<u32>) -> Option<u32> {
        if let Some(index) = preferred {
            if let Some(entry) = self.entries.get(index as usize) {
                if entry.is_wall() {
                    return Some(index);
                }
            }
        }
        self.entries
            .iter()
            .position(SurfaceEntry::is_wall)
            .map(index_of)
    }

    /// Links the opening at `child` under the wall at `parent`.
    ///
    /// The child's parent is set only if it has none yet; the child index
    /// is inserted into the parent's children at most once. Out-of-range
    /// indices are ignored.
    pub fn link_opening(&mut self, child: u32, parent: u32) {
        if let Some(entry) = self.entries.get_mut(child as usize) {
            if entry.parent.is_none() {
                entry.parent = Some(parent);
            }
        }
        if let Some(entry) = self.entries.get_mut(parent as usize) {
            if !entry.children.contains(&child) {
                entry.children.push(child);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn index_of(position: usize) -> u32 {
    position as u32
}
