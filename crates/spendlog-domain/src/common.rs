//! Shared traits and identifier helpers for expense-tracking primitives.

use uuid::Uuid;

/// Exposes a stable identifier for entities owned by the store.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Generates a fresh opaque identifier.
///
/// Identifiers are treated as plain text everywhere else, so records written by
/// older builds with non-UUID ids still load and match.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
