//! Generation prompt assembly.
//!
//! Renders a [`GenerationContext`] into the single prompt handed to the
//! generation backend. Sections are joined with blank lines. The builder
//! owns the prioritized truncation policy: the backend's input is bounded,
//! so when the rendered prompt exceeds the character budget, the oldest
//! history entries are dropped first, then the oldest relationship facts.
//! Preferences, weather, and news are never dropped.

use crate::context::GenerationContext;

/// Marker substituted when the news digest is absent.
pub const NO_NEWS_MARKER: &str = "No significant news updates for this day.";

/// Marker substituted when the user has no prior itineraries.
pub const NO_HISTORY_MARKER: &str = "No previous interactions available.";

/// Default prompt character budget.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 8_000;

/// Builder for the itinerary generation prompt.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    context: &'a GenerationContext,
    max_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for a generation context.
    pub fn new(context: &'a GenerationContext) -> Self {
        Self {
            context,
            max_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    /// Set the prompt character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Build the final prompt, applying prioritized truncation.
    pub fn build(self) -> String {
        let mut history: &[String] = &self.context.history;
        let mut facts = self.context.facts.as_slice();

        let mut prompt = render(self.context, history, facts);

        // Drop oldest history entries first, then oldest facts, until the
        // prompt fits. Required sections are never dropped.
        while prompt.chars().count() > self.max_chars {
            if !history.is_empty() {
                history = &history[1..];
            } else if !facts.is_empty() {
                facts = &facts[1..];
            } else {
                break;
            }
            prompt = render(self.context, history, facts);
        }

        prompt
    }
}

fn render(
    context: &GenerationContext,
    history: &[String],
    facts: &[daytrip_types::RelationshipFact],
) -> String {
    let request = &context.request;
    let weather = &context.weather;
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!(
        "You are a tour planner. Use the user's past interactions, preferences, \
         and graph data to create a one-day itinerary for {} on {}.",
        request.city, request.date
    ));

    let fact_lines: Vec<String> = facts
        .iter()
        .map(|fact| format!("{}: {}", fact.relationship, fact.entity))
        .collect();
    sections.push(format!("Graph data:\n{}", fact_lines.join("\n")));

    let history_text = if history.is_empty() {
        NO_HISTORY_MARKER.to_string()
    } else {
        history.join("\n\n")
    };
    sections.push(format!("Previous interactions:\n{}", history_text));

    sections.push(format!(
        "User preferences:\n\
         - Start time: {}\n\
         - Budget: \u{20b9}{}\n\
         - Interests: {}\n\
         - Starting point: {}",
        request.timing, request.budget, request.interests, request.start_location
    ));

    sections.push(format!(
        "Weather in {}:\n- {}\n- Temperature: {}\u{b0}C\n- Humidity: {}%",
        request.city,
        capitalize(&weather.description),
        weather.temperature_c,
        weather.humidity
    ));

    let news_text = match &context.news {
        Some(digest) if !digest.is_empty() => digest
            .articles
            .iter()
            .map(|article| format!("- {} ({})", article.title, article.source))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_NEWS_MARKER.to_string(),
    };
    sections.push(format!("News in {}:\n{}", request.city, news_text));

    sections.push(
        "Suggest a list of places to visit, the order, transportation options, \
         time allocations, and a lunch recommendation."
            .to_string(),
    );

    sections.join("\n\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_types::{NewsArticle, NewsDigest, RelationshipFact, TripRequest, WeatherSnapshot};

    fn paris_context() -> GenerationContext {
        GenerationContext {
            request: TripRequest::new(
                "Paris",
                "2024-06-01".parse().unwrap(),
                "9:00 AM",
                "culture, food",
                1000.0,
                "Hotel",
            )
            .unwrap(),
            weather: WeatherSnapshot {
                description: "clear sky".to_string(),
                temperature_c: 22.0,
                humidity: 50,
            },
            news: None,
            facts: Vec::new(),
            history: Vec::new(),
        }
    }

    #[test]
    fn test_prompt_contains_required_sections() {
        let context = paris_context();
        let prompt = PromptBuilder::new(&context).build();

        assert!(prompt.contains("one-day itinerary for Paris on 2024-06-01"));
        assert!(prompt.contains("- Start time: 9:00 AM"));
        assert!(prompt.contains("1000"));
        assert!(prompt.contains("- Interests: culture, food"));
        assert!(prompt.contains("Weather in Paris:"));
        assert!(prompt.contains("- Clear sky"));
        assert!(prompt.contains("- Temperature: 22\u{b0}C"));
        assert!(prompt.contains("- Humidity: 50%"));
        assert!(prompt.contains("lunch recommendation"));
    }

    #[test]
    fn test_absent_news_renders_marker() {
        let context = paris_context();
        let prompt = PromptBuilder::new(&context).build();
        assert!(prompt.contains(NO_NEWS_MARKER));
    }

    #[test]
    fn test_present_news_renders_articles() {
        let mut context = paris_context();
        context.news = Some(NewsDigest::from_articles(vec![NewsArticle {
            title: "Festival opens".to_string(),
            source: "Le Monde".to_string(),
        }]));

        let prompt = PromptBuilder::new(&context).build();
        assert!(prompt.contains("- Festival opens (Le Monde)"));
        assert!(!prompt.contains(NO_NEWS_MARKER));
    }

    #[test]
    fn test_empty_history_renders_marker() {
        let context = paris_context();
        let prompt = PromptBuilder::new(&context).build();
        assert!(prompt.contains(NO_HISTORY_MARKER));
    }

    #[test]
    fn test_facts_rendered_as_relation_entity_lines() {
        let mut context = paris_context();
        context.facts = vec![
            RelationshipFact::new("VISITED", "Louvre"),
            RelationshipFact::new("LIKES", "Street food"),
        ];

        let prompt = PromptBuilder::new(&context).build();
        assert!(prompt.contains("VISITED: Louvre"));
        assert!(prompt.contains("LIKES: Street food"));
    }

    #[test]
    fn test_history_in_chronological_order() {
        let mut context = paris_context();
        context.history = vec!["first day".to_string(), "second day".to_string()];

        let prompt = PromptBuilder::new(&context).build();
        let first = prompt.find("first day").unwrap();
        let second = prompt.find("second day").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_truncation_drops_oldest_history_first() {
        let mut context = paris_context();
        context.history = vec![
            "x".repeat(500),
            "recent entry".to_string(),
        ];
        context.facts = vec![RelationshipFact::new("VISITED", "Louvre")];

        let baseline = PromptBuilder::new(&context).build();
        let budget = baseline.chars().count() - 400;
        let prompt = PromptBuilder::new(&context).with_max_chars(budget).build();

        assert!(!prompt.contains(&"x".repeat(500)));
        assert!(prompt.contains("recent entry"));
        assert!(prompt.contains("VISITED: Louvre"));
    }

    #[test]
    fn test_truncation_drops_facts_after_history() {
        let mut context = paris_context();
        context.history = vec!["old".to_string()];
        context.facts = vec![
            RelationshipFact::new("VISITED", "Louvre"),
            RelationshipFact::new("LIKES", "Street food"),
        ];

        // Tiny budget: everything droppable goes, required sections stay
        let prompt = PromptBuilder::new(&context).with_max_chars(100).build();
        assert!(!prompt.contains("old"));
        assert!(!prompt.contains("VISITED: Louvre"));
        assert!(prompt.contains("Weather in Paris:"));
        assert!(prompt.contains("User preferences:"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize(""), "");
    }
}
