use crate::models::Listing;
use serde::Serialize;
use std::fmt;

/// Listing attribute a clause constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    City,
    Area,
    PropertyType,
    Bedrooms,
    Price,
    Amenities,
    TransactionType,
}

impl Field {
    /// Attribute name in the hosted index
    pub fn attribute(&self) -> &'static str {
        match self {
            Field::City => "city",
            Field::Area => "locality",
            Field::PropertyType => "propertyType",
            Field::Bedrooms => "bedrooms",
            Field::Price => "price",
            Field::Amenities => "amenities",
            Field::TransactionType => "transactionType",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClauseValue {
    Text(String),
    Number(u64),
}

/// One `(field, operator, value)` test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub field: Field,
    pub op: Operator,
    pub value: ClauseValue,
}

impl Clause {
    pub fn text(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            op: Operator::Eq,
            value: ClauseValue::Text(value.into()),
        }
    }

    pub fn number(field: Field, op: Operator, value: u64) -> Self {
        Self {
            field,
            op,
            value: ClauseValue::Number(value),
        }
    }

    /// Hosted-index syntax: `city:"Pune"` or `price <= 20000000`
    pub fn to_filter_string(&self) -> String {
        match &self.value {
            ClauseValue::Text(s) => format!("{}:\"{}\"", self.field.attribute(), escape_filter_value(s)),
            ClauseValue::Number(n) => format!("{} {} {}", self.field.attribute(), self.op.symbol(), n),
        }
    }

    /// In-memory test. Text clauses are case-insensitive containment.
    pub fn matches(&self, listing: &Listing) -> bool {
        match (&self.value, self.field) {
            (ClauseValue::Text(v), Field::City) => contains_ci(&listing.city, v),
            (ClauseValue::Text(v), Field::PropertyType) => contains_ci(listing.property_type.as_str(), v),
            (ClauseValue::Text(v), Field::Area) => {
                listing.locality.as_deref().is_some_and(|l| contains_ci(l, v))
                    || contains_ci(&listing.address, v)
            }
            (ClauseValue::Text(v), Field::Amenities) => amenity_terms(v).all(|term| {
                listing.amenities.iter().any(|a| contains_ci(a, term))
                    || contains_ci(&listing.description, term)
            }),
            (ClauseValue::Text(v), Field::TransactionType) => {
                listing.transaction().as_str().eq_ignore_ascii_case(v.trim())
            }
            (ClauseValue::Number(n), Field::Bedrooms) => compare(listing.bedrooms as u64, self.op, *n),
            (ClauseValue::Number(n), Field::Price) => compare(listing.price, self.op, *n),
            // The compiler never pairs fields with the other value kind
            _ => false,
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ClauseValue::Text(s) => write!(
                f,
                "{}{}'{}'",
                self.field.attribute(),
                self.op.symbol(),
                s.replace('\\', "\\\\").replace('\'', "\\'")
            ),
            ClauseValue::Number(n) => write!(f, "{}{}{}", self.field.attribute(), self.op.symbol(), n),
        }
    }
}

/// Non-empty conjunction of clauses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterExpression {
    clauses: Vec<Clause>,
}

impl FilterExpression {
    /// `None` for an empty clause list: "no filter" is not an expression.
    pub fn new(clauses: Vec<Clause>) -> Option<Self> {
        (!clauses.is_empty()).then_some(Self { clauses })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn to_filter_string(&self) -> String {
        self.clauses
            .iter()
            .map(Clause::to_filter_string)
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.clauses.iter().all(|c| c.matches(listing))
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.clauses.iter().map(Clause::to_string).collect();
        f.write_str(&parts.join(" AND "))
    }
}

/// Escapes backslashes and double quotes so a value cannot close its clause.
pub fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle.trim().to_lowercase().as_str())
}

/// "parking, garden and gym" -> ["parking", "garden", "gym"]
fn amenity_terms(value: &str) -> impl Iterator<Item = &str> {
    value
        .split([',', ';', '&'])
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn compare(actual: u64, op: Operator, expected: u64) -> bool {
    match op {
        Operator::Eq => actual == expected,
        Operator::Gte => actual >= expected,
        Operator::Lte => actual <= expected,
    }
}
