//! Random passage sampling.
//!
//! Passage ids are dense (`1..=N`, zero-padded), so a random pick is a single
//! point read instead of a filtered scan. Picks that fail the eligibility
//! predicate are redrawn up to a fixed cap. The sampler can therefore miss
//! eligible passages when they are rare; exhausting the cap is a normal
//! `None` outcome, and every call starts fresh.

use std::future::Future;
use std::sync::Mutex;

use corpus_core::error::DomainError;
use corpus_core::rng::DeterministicRng;
use corpus_core::store::{Document, DocumentStore};
use tracing::{debug, info, warn};

use crate::application::query_handlers::with_original_text;
use crate::domain::eligibility::EligibilityPolicy;
use crate::domain::passage::{PASSAGES_COLLECTION, id_with_zeros, source_url};

/// Number of draws before the sampler gives up.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 100;

/// Draws uniform numbers in `[1, N]` until a draw yields an eligible item or
/// the attempt cap is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedRejectionSampler {
    max_attempts: u32,
}

impl BoundedRejectionSampler {
    /// Create a sampler that makes at most `max_attempts` draws per call.
    #[must_use]
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// The attempt cap.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs one sampling round over a population of `population` items.
    ///
    /// `draw` receives a number in `[1, population]` and resolves to
    /// `Some(item)` if that item is eligible. An empty population yields
    /// `None` without drawing.
    ///
    /// The RNG mutex is held only for the draw itself, never across an await.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `draw`, or
    /// `DomainError::Infrastructure` if the RNG mutex is poisoned.
    pub async fn sample<T, F, Fut>(
        &self,
        population: u64,
        rng: &Mutex<dyn DeterministicRng + Send>,
        mut draw: F,
    ) -> Result<Option<T>, DomainError>
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = Result<Option<T>, DomainError>>,
    {
        if population == 0 {
            return Ok(None);
        }
        for attempt in 1..=self.max_attempts {
            let number = {
                let mut rng_guard = rng
                    .lock()
                    .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
                rng_guard.next_u64_range(1, population)
            };

            if let Some(item) = draw(number).await? {
                debug!(attempt, number, "sampler accepted draw");
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

impl Default for BoundedRejectionSampler {
    fn default() -> Self {
        Self::new(MAX_SAMPLE_ATTEMPTS)
    }
}

/// Picks one eligible passage at random and attaches its source text.
///
/// The passage count is read once per call. A draw that lands on a missing
/// document, or on one without a readable URL, counts as a failed attempt.
/// Returns `None` if no eligible passage turned up within the sampler's
/// attempt cap.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails or the RNG mutex
/// is poisoned.
pub async fn retrieve_random_passage(
    store: &dyn DocumentStore,
    rng: &Mutex<dyn DeterministicRng + Send>,
    policy: &EligibilityPolicy,
    sampler: BoundedRejectionSampler,
) -> Result<Option<Document>, DomainError> {
    let population = store.count(PASSAGES_COLLECTION).await?;

    let picked = sampler
        .sample(population, rng, |number| async move {
            let passage_id = id_with_zeros(number);
            let Some(passage) = store.get(PASSAGES_COLLECTION, &passage_id).await? else {
                return Ok(None);
            };
            if source_url(&passage).is_none() {
                warn!(passage_id, "passage has no readable url");
                return Ok(None);
            }
            Ok(policy.is_eligible(&passage).then_some((passage_id, passage)))
        })
        .await?;

    match picked {
        Some((passage_id, passage)) => with_original_text(&passage_id, passage, store)
            .await
            .map(Some),
        None => {
            info!(
                population,
                attempts = sampler.max_attempts(),
                "no eligible passage found"
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use corpus_core::rng::DeterministicRng;
    use corpus_test_support::{
        FailingDocumentStore, InMemoryDocumentStore, MockRng, SeededRng, SequenceRng,
    };
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn seed_passages(store: &InMemoryDocumentStore, count: u64, accepted: impl Fn(u64) -> bool) {
        store.insert("texts2", "t1", json!({ "id": "t1", "title": "Source" }));
        for number in 1..=count {
            let id = id_with_zeros(number);
            store.insert(
                "passages",
                &id,
                json!({
                    "id": id,
                    "text_id": "t1",
                    "url": "https://example.org/speech",
                    "is_accepted_dataset2_datapoint": accepted(number),
                }),
            );
        }
    }

    #[tokio::test]
    async fn test_returns_first_eligible_draw() {
        let store = InMemoryDocumentStore::new();
        seed_passages(&store, 5, |n| n != 4);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![2, 1, 4, 3]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let view = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(view["id"], "0000000004");
        assert_eq!(view["original_text_title"], "Source");
        assert_eq!(rng.lock().unwrap().draws(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_exactly_max_attempts() {
        let store = InMemoryDocumentStore::new();
        seed_passages(&store, 3, |_| true);
        let rng: Mutex<MockRng> = Mutex::new(MockRng);
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let result = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(store.get_calls(), MAX_SAMPLE_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_blocked_sources_are_skipped() {
        let store = InMemoryDocumentStore::new();
        store.insert(
            "passages",
            "0000000001",
            json!({ "id": "0000000001", "url": "https://transcripts.cnn.com/x" }),
        );
        store.insert(
            "passages",
            "0000000002",
            json!({ "id": "0000000002", "url": "https://example.org/y" }),
        );
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![1, 1, 2]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let view = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(view["id"], "0000000002");
    }

    #[tokio::test]
    async fn test_undecodable_passage_counts_as_failed_attempt() {
        let store = InMemoryDocumentStore::new();
        store.insert("passages", "0000000001", json!({ "id": "0000000001", "text_id": 17 }));
        store.insert(
            "passages",
            "0000000002",
            json!({ "id": "0000000002", "url": "https://example.org/y" }),
        );
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![1, 2]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let view = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(view["id"], "0000000002");
        assert_eq!(rng.lock().unwrap().draws(), 2);
    }

    #[tokio::test]
    async fn test_missing_document_counts_as_failed_attempt() {
        let store = InMemoryDocumentStore::new();
        seed_passages(&store, 2, |_| false);
        // Ids are dense by contract; simulate a gap by drawing past the end.
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![9, 9, 9]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let result = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::new(3),
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(store.get_calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_collection_returns_none_without_drawing() {
        let store = InMemoryDocumentStore::new();
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let result = retrieve_random_passage(
            &store,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(store.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let rng: Mutex<MockRng> = Mutex::new(MockRng);
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let result = retrieve_random_passage(
            &FailingDocumentStore,
            rng_ref,
            &EligibilityPolicy::default(),
            BoundedRejectionSampler::default(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_sample_draws_within_population_bounds() {
        let rng: Mutex<SeededRng> = Mutex::new(SeededRng::new(11));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;
        let seen = Mutex::new(Vec::new());

        let result: Option<u64> = BoundedRejectionSampler::new(50)
            .sample(4, rng_ref, |n| {
                seen.lock().unwrap().push(n);
                async { Ok(None) }
            })
            .await
            .unwrap();

        assert!(result.is_none());
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 50);
        assert!(seen.iter().all(|n| (1..=4).contains(n)));
    }

    #[tokio::test]
    async fn test_sample_reaches_numbers_beyond_u32() {
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![9_999_999_999]));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

        let result = BoundedRejectionSampler::new(1)
            .sample(10_000_000_000, rng_ref, |n| async move { Ok(Some(n)) })
            .await
            .unwrap();

        assert_eq!(result, Some(9_999_999_999));
    }

    #[tokio::test]
    async fn test_seeded_draws_span_large_populations() {
        let rng: Mutex<SeededRng> = Mutex::new(SeededRng::new(5));
        let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;
        let population = u64::from(u32::MAX) * 4;
        let seen = Mutex::new(Vec::new());

        let _: Option<u64> = BoundedRejectionSampler::new(64)
            .sample(population, rng_ref, |n| {
                seen.lock().unwrap().push(n);
                async { Ok(None) }
            })
            .await
            .unwrap();

        let seen = seen.into_inner().unwrap();
        assert!(seen.iter().all(|n| (1..=population).contains(n)));
        assert!(seen.iter().any(|n| *n > u64::from(u32::MAX)));
    }

    proptest! {
        #[test]
        fn prop_finds_eligible_passage_when_half_are_eligible(
            count in 1u64..40,
            seed in any::<u64>(),
        ) {
            // Every odd-numbered passage is eligible, so at least half of
            // them are; a miss has probability at most 2^-100.
            let store = InMemoryDocumentStore::new();
            seed_passages(&store, count, |n| n % 2 == 0);
            let rng: Mutex<SeededRng> = Mutex::new(SeededRng::new(seed));
            let rng_ref: &Mutex<dyn DeterministicRng + Send> = &rng;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let view = runtime
                .block_on(retrieve_random_passage(
                    &store,
                    rng_ref,
                    &EligibilityPolicy::default(),
                    BoundedRejectionSampler::default(),
                ))
                .unwrap();

            let view = view.expect("an eligible passage should be found");
            prop_assert_eq!(&view["is_accepted_dataset2_datapoint"], &json!(false));
            prop_assert!(store.get_calls() <= MAX_SAMPLE_ATTEMPTS as usize + 1);
        }
    }
}
