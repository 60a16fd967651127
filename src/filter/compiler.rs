use crate::filter::expression::{Clause, Field, FilterExpression, Operator};
use crate::query::StructuredFilter;

/// Compile a structured filter into an AND-only expression.
///
/// One clause per present field, in a fixed order. Returns `None` when no
/// field is set so the caller can run a plain text search instead. Pure:
/// the same filter always compiles to the same expression.
pub fn compile(filter: &StructuredFilter) -> Option<FilterExpression> {
    let mut clauses = Vec::new();

    if let Some(city) = &filter.city {
        clauses.push(Clause::text(Field::City, city));
    }
    if let Some(property_type) = filter.property_type {
        clauses.push(Clause::text(Field::PropertyType, property_type.as_str()));
    }
    if let Some(min) = filter.bedrooms_min {
        clauses.push(Clause::number(Field::Bedrooms, Operator::Gte, min.into()));
    }
    if let Some(max) = filter.bedrooms_max {
        clauses.push(Clause::number(Field::Bedrooms, Operator::Lte, max.into()));
    }
    if let Some(price) = filter.price_max {
        clauses.push(Clause::number(Field::Price, Operator::Lte, price));
    }
    if let Some(area) = &filter.area {
        clauses.push(Clause::text(Field::Area, area));
    }
    if let Some(amenities) = &filter.amenities {
        clauses.push(Clause::text(Field::Amenities, amenities));
    }
    if let Some(transaction) = filter.transaction_type {
        clauses.push(Clause::text(Field::TransactionType, transaction.as_str()));
    }

    FilterExpression::new(clauses)
}
