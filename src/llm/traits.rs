use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// One prompt call: a fixed instruction plus the user's text
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    pub instruction: &'a str,
    pub input: &'a str,
    /// Ask the model for JSON-only output
    pub json_output: bool,
}

/// What a model hands back. Providers differ: some return raw text, some
/// return an already-decoded object.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Text(String),
    Json(serde_json::Value),
}

/// Common trait for text-generation models
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &PromptRequest<'_>) -> Result<ModelOutput, LlmError>;

    fn model_name(&self) -> &str;
}

#[async_trait]
impl TextGenerator for Arc<dyn TextGenerator> {
    async fn generate(&self, request: &PromptRequest<'_>) -> Result<ModelOutput, LlmError> {
        (**self).generate(request).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
