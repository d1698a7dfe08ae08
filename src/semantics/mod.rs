mod assign;
mod binding;
mod catalog;
mod payload;
mod registry;

pub use assign::{AssignSurface, Assignment};
pub use binding::{AttributeLayer, BindingStore, FaceBindingStore, PropertyLayer};
pub use catalog::surface_types_for;
pub use payload::SemanticsPayload;
pub use registry::{SurfaceEntry, SurfaceRegistry};

/// Type-name suffix identifying wall-kind surface entries.
pub const WALL_SURFACE_SUFFIX: &str = "WallSurface";

/// Surface types that are cut into a wall and parented to it.
pub const OPENING_TYPES: [&str; 2] = ["Window", "Door"];

/// Sentinel for a face with no bound surface entry.
pub const UNBOUND: i64 = -1;

/// `true` for opening surface types (`Window`, `Door`).
#[must_use]
pub fn is_opening(kind: &str) -> bool {
    OPENING_TYPES.contains(&kind)
}
