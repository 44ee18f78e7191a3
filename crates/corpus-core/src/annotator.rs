//! Annotator tags.

/// Prefix of every stored annotator/team tag.
pub const ANNOTATOR_TAG_PREFIX: &str = "IE-";

/// Formats the stored tag for an annotator or team identifier, e.g. `IE-4`.
#[must_use]
pub fn annotator_tag(id: &str) -> String {
    format!("{ANNOTATOR_TAG_PREFIX}{id}")
}
