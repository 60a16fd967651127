use crate::llm::{LlmError, ModelOutput, PromptRequest, TextGenerator};
use crate::models::Listing;
use crate::query::prompt::SUGGEST_IMPROVEMENT_INSTRUCTION;
use serde::Deserialize;
use tracing::{debug, info};

/// Listings summarised in the prompt; the rest are only counted
const SUMMARY_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Suggestions {
    #[serde(default)]
    improved_query_suggestions: Vec<String>,
}

/// Asks the model how a query could be refined, given what it returned
pub struct SearchImprover<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> SearchImprover<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn suggest(&self, query: &str, listings: &[Listing]) -> Result<Vec<String>, LlmError> {
        let input = format!(
            "Original Search Query: {}\n\nInitial Search Results: {}",
            query,
            summarize(listings)
        );
        let request = PromptRequest {
            instruction: SUGGEST_IMPROVEMENT_INSTRUCTION,
            input: &input,
            json_output: true,
        };

        let parsed: Suggestions = match self.generator.generate(&request).await? {
            ModelOutput::Text(text) => serde_json::from_str(text.trim())?,
            ModelOutput::Json(value) => serde_json::from_value(value)?,
        };

        let suggestions: Vec<String> = parsed
            .improved_query_suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        info!("Got {} query suggestions", suggestions.len());
        debug!("Suggestions: {:?}", suggestions);
        Ok(suggestions)
    }
}

/// One line per listing, compact enough for a prompt
pub fn summarize(listings: &[Listing]) -> String {
    if listings.is_empty() {
        return "No properties matched.".to_string();
    }

    let mut lines: Vec<String> = listings
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|l| {
            format!(
                "- {} in {} ({}): {} bedrooms, price {} ({})",
                l.property_type,
                l.address,
                l.city,
                l.bedrooms,
                l.price,
                l.transaction()
            )
        })
        .collect();

    if listings.len() > SUMMARY_LIMIT {
        lines.push(format!("...and {} more", listings.len() - SUMMARY_LIMIT));
    }
    format!("{} properties found\n{}", listings.len(), lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::sample_listings;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, request: &PromptRequest<'_>) -> Result<ModelOutput, LlmError> {
            assert!(request.input.contains("Original Search Query: flats in Pune"));
            Ok(ModelOutput::Text(self.0.to_string()))
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn parses_suggestion_list() {
        let improver = SearchImprover::new(Canned(
            r#"{"improvedQuerySuggestions": ["2 BHK flats in Baner, Pune", "  ", "flats in Pune with parking"]}"#,
        ));
        let suggestions = improver.suggest("flats in Pune", &[]).await.unwrap();
        assert_eq!(suggestions, vec!["2 BHK flats in Baner, Pune", "flats in Pune with parking"]);
    }

    #[tokio::test]
    async fn malformed_reply_is_an_error() {
        let improver = SearchImprover::new(Canned("try harder"));
        assert!(matches!(
            improver.suggest("flats in Pune", &[]).await,
            Err(LlmError::Json(_))
        ));
    }

    #[test]
    fn summary_is_capped() {
        let mut listings = sample_listings();
        listings.extend(sample_listings());
        let summary = summarize(&listings);
        assert!(summary.starts_with(&format!("{} properties found", listings.len())));
        assert!(summary.ends_with(&format!("...and {} more", listings.len() - SUMMARY_LIMIT)));
        assert_eq!(summarize(&[]), "No properties matched.");
    }
}
