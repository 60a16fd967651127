pub mod prompt;
pub mod structurer;
pub mod types;

pub use structurer::QueryStructurer;
pub use types::{parse_amount, FallbackReason, StructureOutcome, StructuredFilter};
