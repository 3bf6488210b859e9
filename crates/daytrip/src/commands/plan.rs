//! Plan command - generate a one-day itinerary.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::Args;
use console::Style;
use tracing::warn;

use daytrip_agent::{Planner, PlannerConfig, SessionContext};
use daytrip_llm::{CompletionBackend, CompletionConfig};
use daytrip_memory::FactStore;
use daytrip_providers::{NewsConfig, NewsProvider, WeatherConfig, WeatherProvider};
use daytrip_session::SessionHistory;
use daytrip_types::TripRequest;

use super::Context;

/// Arguments for the plan command.
///
/// Fields left unset fall back to the user's stored preferences, so a
/// returning user can re-plan with just `daytrip plan --user <id>`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// User identifier
    #[arg(short, long)]
    pub user: String,

    /// City for the tour
    #[arg(short, long)]
    pub city: Option<String>,

    /// Date of the tour (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Start time (e.g., "9:00 AM")
    #[arg(short, long)]
    pub timing: Option<String>,

    /// Interests (e.g., "culture, food")
    #[arg(short, long)]
    pub interests: Option<String>,

    /// Daily budget
    #[arg(short, long)]
    pub budget: Option<f64>,

    /// Starting location (e.g., "Hotel")
    #[arg(short = 's', long)]
    pub start_location: Option<String>,
}

/// Run the plan command.
pub async fn run(args: PlanArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();

    let store = Arc::new(FactStore::open(ctx.config.store.effective_db_path())?);

    // Stored preferences pre-fill anything not given on the command line
    let stored = store
        .fetch_profile(&args.user)?
        .map(|profile| profile.preferences);

    let city = args
        .city
        .or_else(|| stored.as_ref().map(|p| p.city.clone()))
        .context("no city given and no stored preferences; pass --city")?;
    let date = args
        .date
        .or_else(|| stored.as_ref().map(|p| p.date))
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let timing = args
        .timing
        .or_else(|| stored.as_ref().map(|p| p.timing.clone()))
        .unwrap_or_else(|| "9:00 AM".to_string());
    let interests = args
        .interests
        .or_else(|| stored.as_ref().map(|p| p.interests.clone()))
        .unwrap_or_default();
    let budget = args
        .budget
        .or(stored.as_ref().map(|p| p.budget))
        .unwrap_or(1000.0);
    let start_location = args
        .start_location
        .or_else(|| stored.as_ref().map(|p| p.start_location.clone()))
        .unwrap_or_else(|| "Hotel".to_string());

    let request = TripRequest::new(city, date, timing, interests, budget, start_location)?;

    if ctx.verbose {
        println!(
            "{}",
            dim.apply_to(format!(
                "Planning {} on {} for {}",
                request.city, request.date, args.user
            ))
        );
    }

    let planner = build_planner(store, ctx)?;
    let session = SessionContext::new(&args.user)?;

    let itinerary = planner.plan(&session, &request).await?;

    println!(
        "{}",
        dim.apply_to(format!(
            "Itinerary for {} on {}:",
            request.city, request.date
        ))
    );
    println!();
    println!("{}", itinerary.trim());

    Ok(())
}

/// Wire the planner from configuration.
fn build_planner(store: Arc<FactStore>, ctx: &Context) -> Result<Planner> {
    let weather_key = ctx
        .config
        .weather
        .resolve_api_key("OPENWEATHER_API_KEY")
        .context("weather API key not configured; set OPENWEATHER_API_KEY or [weather].api_key")?;
    let mut weather_config = WeatherConfig::new(weather_key);
    if let Some(url) = &ctx.config.weather.base_url {
        weather_config = weather_config.with_base_url(url);
    }
    let weather = WeatherProvider::new(weather_config)?;

    // News is best-effort: without a key every fetch just comes back
    // absent and the prompt carries the no-news marker.
    let news_key = ctx
        .config
        .news
        .resolve_api_key("NEWSAPI_API_KEY")
        .unwrap_or_default();
    if news_key.is_empty() {
        warn!("No news API key configured, news context will be absent");
    }
    let mut news_config = NewsConfig::new(news_key);
    if let Some(url) = &ctx.config.news.base_url {
        news_config = news_config.with_base_url(url);
    }
    let news = NewsProvider::new(news_config)?;

    let generation = &ctx.config.generation;
    let mut completion_config = CompletionConfig::new(&generation.base_url, &generation.model);
    if let Some(key) = &generation.api_key {
        completion_config = completion_config.with_api_key(key);
    }
    let generator = CompletionBackend::new(completion_config)?;

    Ok(Planner::new(
        store,
        Arc::new(weather),
        Arc::new(news),
        Arc::new(generator),
        SessionHistory::new(),
        PlannerConfig {
            max_output_tokens: generation.max_output_tokens,
            temperature: generation.temperature,
            max_prompt_chars: ctx.config.prompt.max_chars,
        },
    ))
}
