//! Which passages may be offered for annotation.

use corpus_core::store::Document;
use corpus_core::value::is_truthy;

use crate::domain::passage::{ACCEPTED_FIELD, source_url};

/// Source excluded from sampling unless configured otherwise.
pub const DEFAULT_BLOCKED_SOURCE: &str = "https://transcripts.cnn.com";

/// Exclusion predicate for the random sampler. A passage is ineligible if it
/// was already accepted, has no readable URL, or its URL contains a blocked
/// pattern. Rejected passages stay eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityPolicy {
    blocked_source_patterns: Vec<String>,
}

impl EligibilityPolicy {
    /// Create a policy blocking URLs that contain any of `patterns`. Blank
    /// patterns are ignored.
    #[must_use]
    pub fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            blocked_source_patterns: patterns
                .into_iter()
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// The active blocked patterns.
    #[must_use]
    pub fn blocked_source_patterns(&self) -> &[String] {
        &self.blocked_source_patterns
    }

    /// Returns `true` if `url` matches a blocked pattern.
    #[must_use]
    pub fn is_blocked_source(&self, url: &str) -> bool {
        self.blocked_source_patterns
            .iter()
            .any(|pattern| url.contains(pattern.as_str()))
    }

    /// Returns `true` if the stored passage may be offered to an annotator.
    /// Only the acceptance flag and the URL are read.
    #[must_use]
    pub fn is_eligible(&self, passage: &Document) -> bool {
        let accepted = passage.get(ACCEPTED_FIELD).is_some_and(is_truthy);
        !accepted && source_url(passage).is_some_and(|url| !self.is_blocked_source(url))
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_BLOCKED_SOURCE.to_owned()])
    }
}
