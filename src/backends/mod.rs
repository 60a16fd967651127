pub mod algolia;
pub mod memory;
pub mod sample;
pub mod traits;

pub use algolia::{AlgoliaIndex, BatchResponse};
pub use memory::MemoryBackend;
pub use sample::sample_listings;
pub use traits::{SearchBackend, SearchRequest};
