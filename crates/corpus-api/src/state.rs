//! Shared application state.

use std::sync::{Arc, Mutex};

use corpus_core::rng::DeterministicRng;
use corpus_core::store::DocumentStore;
use corpus_passages::domain::eligibility::EligibilityPolicy;

use crate::auth::AuthConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding texts and passages.
    pub store: Arc<dyn DocumentStore>,
    /// RNG used by the passage sampler.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Which passages the sampler may return.
    pub eligibility: Arc<EligibilityPolicy>,
    /// Basic auth credentials.
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        eligibility: EligibilityPolicy,
        auth: AuthConfig,
    ) -> Self {
        Self {
            store,
            rng,
            eligibility: Arc::new(eligibility),
            auth: Arc::new(auth),
        }
    }
}
