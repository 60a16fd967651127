use crate::backends::{SearchBackend, SearchRequest};
use crate::error::SearchError;
use crate::filter::{compile, FilterExpression};
use crate::llm::TextGenerator;
use crate::models::Listing;
use crate::query::{QueryStructurer, StructuredFilter};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Everything one search produced
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub filter: StructuredFilter,
    pub expression: Option<FilterExpression>,
    pub listings: Vec<Listing>,
    /// Which search this was; see [`SearchPipeline::is_current`]
    pub generation: u64,
}

impl SearchOutcome {
    pub fn is_filtered(&self) -> bool {
        self.expression.is_some()
    }
}

/// Structurer -> compiler -> backend, strictly in sequence
pub struct SearchPipeline<G: TextGenerator, B: SearchBackend> {
    structurer: QueryStructurer<G>,
    backend: B,
    generation: AtomicU64,
}

impl<G: TextGenerator, B: SearchBackend> SearchPipeline<G, B> {
    pub fn new(generator: G, backend: B) -> Self {
        Self {
            structurer: QueryStructurer::new(generator),
            backend,
            generation: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one search. Only an empty query or a backend failure is an
    /// error; structuring problems degrade to an unfiltered text search.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Search #{}: {}", generation, query);

        let filter = self.structurer.structure(query).await;
        let expression = compile(&filter);

        match &expression {
            Some(expr) => info!("Filter: {}", expr),
            None => info!("No usable filter, running plain text search"),
        }

        let request = SearchRequest {
            text: query,
            filter: &filter,
            expression: expression.as_ref(),
        };
        let listings = self.backend.search(&request).await?;

        info!(
            "Search #{} found {} listings via {}",
            generation,
            listings.len(),
            self.backend.backend_name()
        );

        Ok(SearchOutcome {
            query: query.to_string(),
            filter,
            expression,
            listings,
            generation,
        })
    }

    /// False once a newer search has started, so stale results can be dropped
    pub fn is_current(&self, outcome: &SearchOutcome) -> bool {
        self.generation.load(Ordering::SeqCst) == outcome.generation
    }
}
