pub mod compiler;
pub mod expression;

pub use compiler::compile;
pub use expression::{escape_filter_value, Clause, ClauseValue, Field, FilterExpression, Operator};
