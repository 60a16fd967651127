use crate::llm::{ModelOutput, PromptRequest, TextGenerator};
use crate::query::prompt::STRUCTURE_QUERY_INSTRUCTION;
use crate::query::types::{FallbackReason, StructureOutcome, StructuredFilter};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Key of the wrapper object some providers put around the filter JSON
const WRAPPER_FIELD: &str = "structuredQuery";

/// Turns a free-form query into a [`StructuredFilter`] with one model call.
///
/// Never fails: any model or payload problem yields an empty filter, so the
/// search degrades to plain text instead of erroring. Output for identical
/// inputs is not stable across calls.
pub struct QueryStructurer<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> QueryStructurer<G> {
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn structure(&self, raw: &str) -> StructuredFilter {
        self.structure_outcome(raw).await.into_filter()
    }

    pub async fn structure_outcome(&self, raw: &str) -> StructureOutcome {
        let request = PromptRequest {
            instruction: STRUCTURE_QUERY_INSTRUCTION,
            input: raw,
            json_output: true,
        };

        let output = match self.generator.generate(&request).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Structuring call to {} failed: {}", self.generator.model_name(), e);
                return StructureOutcome::Empty(FallbackReason::ModelError(e.to_string()));
            }
        };

        debug!("Raw model output: {:?}", output);

        match interpret(output) {
            Ok(filter) => {
                info!("Structured query into {}", serde_json::to_string(&filter).unwrap_or_default());
                StructureOutcome::Structured(filter)
            }
            Err(reason) => {
                warn!("Returning empty structured query: {}", reason);
                StructureOutcome::Empty(reason)
            }
        }
    }
}

fn interpret(output: ModelOutput) -> Result<StructuredFilter, FallbackReason> {
    match output {
        ModelOutput::Text(text) => interpret_value(parse_json(&text)?, 0),
        ModelOutput::Json(value) => interpret_value(value, 0),
    }
}

/// Accepts a filter object, a JSON string holding one, or a wrapper whose
/// `structuredQuery` field holds either. Nesting is bounded.
fn interpret_value(value: Value, depth: u8) -> Result<StructuredFilter, FallbackReason> {
    if depth > 2 {
        return Err(FallbackReason::UnexpectedShape);
    }

    match value {
        Value::Object(mut obj) => match obj.remove(WRAPPER_FIELD) {
            Some(inner @ (Value::String(_) | Value::Object(_))) => interpret_value(inner, depth + 1),
            Some(_) => Err(FallbackReason::UnexpectedShape),
            None => Ok(StructuredFilter::from_model_object(&obj)),
        },
        Value::String(encoded) => interpret_value(parse_json(&encoded)?, depth + 1),
        _ => Err(FallbackReason::UnexpectedShape),
    }
}

fn parse_json(text: &str) -> Result<Value, FallbackReason> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| FallbackReason::UnparsableJson(e.to_string()))
}

/// Models sometimes wrap JSON in ```json ... ``` despite being told not to
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag in any case: ```json, ```JSON, ```Json
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
