//! Natural-language property search.
//!
//! A query like "3 BHK in Bangalore under 2 crores" is structured into a
//! [`StructuredFilter`] by a text-generation model, compiled into an AND-only
//! [`FilterExpression`], and run against a [`SearchBackend`].

pub mod backends;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod suggest;

pub use backends::{AlgoliaIndex, MemoryBackend, SearchBackend, SearchRequest};
pub use config::AppConfig;
pub use error::{ConfigError, SearchError};
pub use filter::{compile, FilterExpression};
pub use llm::{GeminiClient, TextGenerator};
pub use models::{Listing, PropertyType, TransactionType};
pub use pipeline::{SearchOutcome, SearchPipeline};
pub use query::{QueryStructurer, StructureOutcome, StructuredFilter};
