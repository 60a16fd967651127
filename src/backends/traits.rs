use crate::error::SearchError;
use crate::filter::FilterExpression;
use crate::models::Listing;
use crate::query::StructuredFilter;
use async_trait::async_trait;

/// Everything a backend may use to answer one search
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    /// The user's original text, trimmed
    pub text: &'a str,
    pub filter: &'a StructuredFilter,
    /// `None` means unfiltered: text search only
    pub expression: Option<&'a FilterExpression>,
}

/// Common trait for all listing search backends
/// so the hosted index and the in-memory set can be swapped freely
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Listing>, SearchError>;

    fn backend_name(&self) -> &'static str;
}
