//! The planning orchestrator.
//!
//! [`Planner::plan`] is the single entry point exposed to the presentation
//! layer: persist the submitted preferences, gather live and remembered
//! context, assemble one prompt, generate, and record the result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use daytrip_llm::{GenerationRequest, SharedBackend};
use daytrip_memory::FactStore;
use daytrip_providers::{NewsSource, WeatherSource};
use daytrip_session::SessionHistory;
use daytrip_types::TripRequest;

use crate::context::{GenerationContext, SessionContext};
use crate::error::{PlanError, Result};
use crate::prompt::{DEFAULT_MAX_PROMPT_CHARS, PromptBuilder};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for the planning cycle.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum output length passed to the generation backend.
    pub max_output_tokens: u32,

    /// Sampling temperature passed to the generation backend.
    pub temperature: f32,

    /// Prompt character budget; see [`PromptBuilder`] for the truncation
    /// policy applied when it is exceeded.
    pub max_prompt_chars: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1024,
            temperature: 0.7,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planner
// ─────────────────────────────────────────────────────────────────────────────

/// Context aggregator and planning orchestrator.
///
/// All collaborators are injected: the durable fact store, the two
/// best-effort context sources, the generation backend, and the
/// process-scoped session history.
pub struct Planner {
    store: Arc<FactStore>,
    weather: Arc<dyn WeatherSource>,
    news: Arc<dyn NewsSource>,
    generator: SharedBackend,
    history: SessionHistory,
    config: PlannerConfig,
}

impl Planner {
    /// Create a planner from its collaborators.
    pub fn new(
        store: Arc<FactStore>,
        weather: Arc<dyn WeatherSource>,
        news: Arc<dyn NewsSource>,
        generator: SharedBackend,
        history: SessionHistory,
        config: PlannerConfig,
    ) -> Self {
        Self {
            store,
            weather,
            news,
            generator,
            history,
            config,
        }
    }

    /// The session history this planner records into.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Plan a one-day itinerary.
    ///
    /// Persists the request's preference fields first (fatal on store
    /// failure), then gathers weather, news, relationship facts, and
    /// session history. Weather is the one hard dependency; news and
    /// facts are best-effort. On successful generation the itinerary is
    /// appended to the session history and mirrored into the store; on
    /// any fatal error the history is left untouched while the submitted
    /// preferences stay saved, so a retry does not re-enter the form.
    pub async fn plan(&self, session: &SessionContext, request: &TripRequest) -> Result<String> {
        request.validate()?;
        let user_id = session.user_id();

        // Step 1: durable preference write. Later steps assume the profile
        // reflects this request, so failure abandons the cycle.
        self.store
            .upsert_profile(user_id, &request.to_preferences())?;

        // Steps 2-5: independent reads. The two HTTP fetches run
        // concurrently; store reads are local.
        let (weather, news) = tokio::join!(
            self.weather.fetch(&request.city),
            self.news.fetch(&request.city, request.date),
        );

        let weather = weather.ok_or_else(|| PlanError::MissingWeather {
            city: request.city.clone(),
        })?;

        if news.is_none() {
            debug!(city = %request.city, "No news digest, using fallback marker");
        }

        // A failed relationship read is non-fatal: the facts are optional
        // enrichment once the profile write has committed.
        let facts = match self.store.fetch_relationships(user_id) {
            Ok(facts) => facts,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Relationship fetch failed, continuing without facts");
                Vec::new()
            }
        };

        let history = self.session_history(user_id);

        // Step 6: assemble the prompt from the submitted request, not a
        // store re-read.
        let context = GenerationContext {
            request: request.clone(),
            weather,
            news,
            facts,
            history,
        };
        let prompt = PromptBuilder::new(&context)
            .with_max_chars(self.config.max_prompt_chars)
            .build();

        debug!(
            user_id = %user_id,
            prompt_chars = prompt.chars().count(),
            facts = context.facts.len(),
            history = context.history.len(),
            "Generation context assembled"
        );

        // Step 7: generate, then record.
        let response = self
            .generator
            .generate(GenerationRequest::new(
                prompt,
                self.config.max_output_tokens,
                self.config.temperature,
            ))
            .await?;

        self.history.append(user_id, response.text.clone());
        if let Err(e) = self.store.append_history(user_id, &response.text) {
            // The itinerary is already delivered to the session; durability
            // catches up on the next successful mirror.
            warn!(user_id = %user_id, error = %e, "History mirror write failed");
        }

        info!(user_id = %user_id, city = %request.city, "Itinerary planned");
        Ok(response.text)
    }

    /// Read the user's session history, restoring the durable mirror into
    /// the in-process log on first use.
    ///
    /// A fresh process starts with an empty session log; past itineraries
    /// live in the store's mirror. Restoring them here means later appends
    /// keep the two logs consistent, and restored entries are never
    /// re-mirrored (the mirror write only ever carries newly generated
    /// text).
    fn session_history(&self, user_id: &str) -> Vec<String> {
        let history = self.history.read(user_id);
        if !history.is_empty() {
            return history;
        }

        match self.store.fetch_history(user_id) {
            Ok(mirrored) => {
                if !mirrored.is_empty() {
                    debug!(
                        user_id = %user_id,
                        entries = mirrored.len(),
                        "Restored session history from durable mirror"
                    );
                    for entry in &mirrored {
                        self.history.append(user_id, entry.clone());
                    }
                }
                mirrored
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "History restore failed, continuing without it");
                Vec::new()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_llm::MockGenerator;
    use daytrip_providers::{MockNews, MockWeather};
    use daytrip_types::{NewsArticle, NewsDigest, WeatherSnapshot};

    use crate::prompt::{NO_HISTORY_MARKER, NO_NEWS_MARKER};

    fn paris_request() -> TripRequest {
        TripRequest::new(
            "Paris",
            "2024-06-01".parse().unwrap(),
            "9:00 AM",
            "culture, food",
            1000.0,
            "Hotel",
        )
        .unwrap()
    }

    fn clear_sky() -> WeatherSnapshot {
        WeatherSnapshot {
            description: "clear sky".to_string(),
            temperature_c: 22.0,
            humidity: 50,
        }
    }

    struct Harness {
        planner: Planner,
        store: Arc<FactStore>,
        generator: Arc<MockGenerator>,
    }

    fn harness(weather: MockWeather, news: MockNews, generator: MockGenerator) -> Harness {
        let store = Arc::new(FactStore::open_in_memory().unwrap());
        let generator = Arc::new(generator);

        let planner = Planner::new(
            Arc::clone(&store),
            Arc::new(weather),
            Arc::new(news),
            generator.clone(),
            SessionHistory::new(),
            PlannerConfig::default(),
        );

        Harness {
            planner,
            store,
            generator,
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("Morning at the Louvre, lunch nearby."),
        );
        let session = SessionContext::new("romia").unwrap();

        let itinerary = h.planner.plan(&session, &paris_request()).await.unwrap();

        assert!(!itinerary.is_empty());
        assert_eq!(h.planner.history().read("romia"), vec![itinerary.clone()]);

        // Preferences committed durably
        let profile = h.store.fetch_profile("romia").unwrap().unwrap();
        assert_eq!(profile.preferences.budget, 1000.0);

        // History mirrored durably
        assert_eq!(h.store.fetch_history("romia").unwrap(), vec![itinerary]);
    }

    #[tokio::test]
    async fn test_missing_weather_aborts_without_history() {
        let h = harness(
            MockWeather::absent(),
            MockNews::absent(),
            MockGenerator::with_reply("unused"),
        );
        let session = SessionContext::new("romia").unwrap();

        let result = h.planner.plan(&session, &paris_request()).await;
        assert!(matches!(result, Err(PlanError::MissingWeather { .. })));

        // History untouched, generator never called
        assert!(h.planner.history().read("romia").is_empty());
        assert!(h.generator.seen_prompts().is_empty());

        // But the submitted preferences are already saved (step 1 committed)
        assert!(h.store.fetch_profile("romia").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_news_absence_substitutes_marker() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("itinerary"),
        );
        let session = SessionContext::new("romia").unwrap();

        h.planner.plan(&session, &paris_request()).await.unwrap();

        let prompts = h.generator.seen_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(NO_NEWS_MARKER));
    }

    #[tokio::test]
    async fn test_news_present_in_prompt() {
        let digest = NewsDigest::from_articles(vec![NewsArticle {
            title: "Festival opens".to_string(),
            source: "Le Monde".to_string(),
        }]);
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::present(digest),
            MockGenerator::with_reply("itinerary"),
        );
        let session = SessionContext::new("romia").unwrap();

        h.planner.plan(&session, &paris_request()).await.unwrap();

        let prompts = h.generator.seen_prompts();
        assert!(prompts[0].contains("Festival opens (Le Monde)"));
        assert!(!prompts[0].contains(NO_NEWS_MARKER));
    }

    #[tokio::test]
    async fn test_history_ordering_over_multiple_plans() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("itinerary"),
        );
        let session = SessionContext::new("romia").unwrap();

        for _ in 0..3 {
            h.planner.plan(&session, &paris_request()).await.unwrap();
        }

        assert_eq!(h.planner.history().len("romia"), 3);
        assert_eq!(h.store.fetch_history("romia").unwrap().len(), 3);

        // The third call saw the first two itineraries as prior context
        let prompts = h.generator.seen_prompts();
        assert!(prompts[0].contains(NO_HISTORY_MARKER));
        assert!(!prompts[2].contains(NO_HISTORY_MARKER));
    }

    #[tokio::test]
    async fn test_mirrored_history_restored_in_new_process() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("Day two: Musée d'Orsay"),
        );
        let session = SessionContext::new("romia").unwrap();

        // An earlier process left a mirrored itinerary behind; this
        // planner's in-process log starts empty.
        h.store
            .upsert_profile("romia", &paris_request().to_preferences())
            .unwrap();
        h.store.append_history("romia", "Day one: Louvre").unwrap();
        assert!(h.planner.history().read("romia").is_empty());

        let itinerary = h.planner.plan(&session, &paris_request()).await.unwrap();

        // The prior itinerary reached the prompt
        let prompts = h.generator.seen_prompts();
        assert!(prompts[0].contains("Day one: Louvre"));
        assert!(!prompts[0].contains(NO_HISTORY_MARKER));

        // Both logs now agree: restored entry first, new entry appended
        let expected = vec!["Day one: Louvre".to_string(), itinerary];
        assert_eq!(h.planner.history().read("romia"), expected);
        assert_eq!(h.store.fetch_history("romia").unwrap(), expected);
    }

    #[tokio::test]
    async fn test_empty_relationships_tolerated() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("itinerary"),
        );
        let session = SessionContext::new("romia").unwrap();

        let result = h.planner.plan(&session, &paris_request()).await;
        assert!(result.is_ok());

        let prompts = h.generator.seen_prompts();
        assert!(prompts[0].contains("Graph data:"));
    }

    #[tokio::test]
    async fn test_facts_surface_in_prompt() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("itinerary"),
        );
        let session = SessionContext::new("romia").unwrap();

        // Facts are populated outside the planning write path
        h.store
            .upsert_profile("romia", &paris_request().to_preferences())
            .unwrap();
        h.store
            .add_relationship("romia", "VISITED", "Louvre")
            .unwrap();

        h.planner.plan(&session, &paris_request()).await.unwrap();

        let prompts = h.generator.seen_prompts();
        assert!(prompts[0].contains("VISITED: Louvre"));
    }

    #[tokio::test]
    async fn test_generation_failure_leaves_history_untouched() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::failing(),
        );
        let session = SessionContext::new("romia").unwrap();

        let result = h.planner.plan(&session, &paris_request()).await;
        assert!(matches!(result, Err(PlanError::Generation(_))));

        assert!(h.planner.history().read("romia").is_empty());
        assert!(h.store.fetch_history("romia").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_rejected() {
        let h = harness(
            MockWeather::present(clear_sky()),
            MockNews::absent(),
            MockGenerator::with_reply("unused"),
        );
        let session = SessionContext::new("romia").unwrap();

        let mut request = paris_request();
        request.budget = -5.0;

        let result = h.planner.plan(&session, &request).await;
        assert!(matches!(result, Err(PlanError::InvalidRequest(_))));

        // Nothing was written before validation failed
        assert!(h.store.fetch_profile("romia").unwrap().is_none());
    }
}
