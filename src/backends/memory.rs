use crate::backends::sample::sample_listings;
use crate::backends::traits::{SearchBackend, SearchRequest};
use crate::error::SearchError;
use crate::models::Listing;
use async_trait::async_trait;
use tracing::debug;

/// Predicate filter over a fixed listing set. No ranking, no text matching:
/// results keep dataset order.
pub struct MemoryBackend {
    listings: Vec<Listing>,
}

impl MemoryBackend {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Backend over the bundled sample listings
    pub fn sample() -> Self {
        Self::new(sample_listings())
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<Listing>, SearchError> {
        let Some(expression) = request.expression else {
            debug!("No filter, returning all {} listings", self.listings.len());
            return Ok(self.listings.clone());
        };

        let hits: Vec<Listing> = self
            .listings
            .iter()
            .filter(|listing| expression.matches(listing))
            .cloned()
            .collect();

        debug!("{} of {} listings match {}", hits.len(), self.listings.len(), expression);
        Ok(hits)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
