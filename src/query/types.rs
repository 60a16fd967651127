use crate::models::{PropertyType, TransactionType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

pub const LAKH: f64 = 100_000.0;
pub const CRORE: f64 = 10_000_000.0;

/// Bounded set of constraints extracted from a free-form query.
///
/// Every field is optional and `None` means unconstrained. When both bedroom
/// bounds are present, `bedrooms_min <= bedrooms_max`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_max: Option<u32>,
    /// Whole rupees, lakh/crore already expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl StructuredFilter {
    pub fn is_empty(&self) -> bool {
        *self == StructuredFilter::default()
    }

    /// Read a model-produced object field by field.
    ///
    /// Keys may be snake_case or camelCase. A field that cannot be read is
    /// dropped on its own; it never invalidates the rest of the object.
    pub fn from_model_object(obj: &Map<String, Value>) -> Self {
        let mut filter = StructuredFilter {
            city: lookup(obj, &["city"]).and_then(|v| text("city", v)),
            area: lookup(obj, &["area", "locality"]).and_then(|v| text("area", v)),
            property_type: lookup(obj, &["propertyType", "property_type"])
                .and_then(|v| parsed("propertyType", v)),
            bedrooms_min: lookup(obj, &["bedrooms_min", "bedroomsMin"])
                .and_then(|v| count("bedroomsMin", v)),
            bedrooms_max: lookup(obj, &["bedrooms_max", "bedroomsMax"])
                .and_then(|v| count("bedroomsMax", v)),
            price_max: lookup(obj, &["price_max", "priceMax"]).and_then(|v| price("priceMax", v)),
            amenities: lookup(obj, &["amenities"]).and_then(|v| text("amenities", v)),
            transaction_type: lookup(obj, &["transactionType", "transaction_type"])
                .and_then(|v| parsed("transactionType", v)),
        };

        if let (Some(min), Some(max)) = (filter.bedrooms_min, filter.bedrooms_max) {
            if min > max {
                warn!("Bedroom range arrived inverted ({} > {}), swapping", min, max);
                filter.bedrooms_min = Some(max);
                filter.bedrooms_max = Some(min);
            }
        }

        filter
    }
}

/// Why structuring produced no filter
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The model call itself failed (network, status, timeout)
    ModelError(String),
    /// The payload was not JSON
    UnparsableJson(String),
    /// JSON, but neither a filter object nor a wrapper around one
    UnexpectedShape,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::ModelError(e) => write!(f, "model call failed: {}", e),
            FallbackReason::UnparsableJson(e) => write!(f, "response is not valid JSON: {}", e),
            FallbackReason::UnexpectedShape => f.write_str("response has an unexpected shape"),
        }
    }
}

/// Result of structuring one query. There is no error arm.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureOutcome {
    Structured(StructuredFilter),
    Empty(FallbackReason),
}

impl StructureOutcome {
    pub fn into_filter(self) -> StructuredFilter {
        match self {
            StructureOutcome::Structured(filter) => filter,
            StructureOutcome::Empty(_) => StructuredFilter::default(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, StructureOutcome::Empty(_))
    }
}

/// Parse "2 crore", "15 lakhs", "1.5cr", "₹ 85,00,000" or "20000000" into rupees
pub fn parse_amount(raw: &str) -> Option<u64> {
    let mut s = raw.trim().to_lowercase().replace([',', '_'], "");
    for prefix in ["₹", "inr", "rs.", "rs"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start().to_string();
            break;
        }
    }

    let split = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let number: f64 = number.parse().ok()?;

    let multiplier = match unit.trim().trim_end_matches('.') {
        "" => 1.0,
        "k" | "thousand" => 1_000.0,
        "l" | "lac" | "lacs" | "lakh" | "lakhs" => LAKH,
        "m" | "mn" | "million" | "millions" => 1_000_000.0,
        "cr" | "crs" | "crore" | "crores" => CRORE,
        _ => return None,
    };

    let value = number * multiplier;
    (value.is_finite() && value >= 0.0).then(|| value.round() as u64)
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn text(field: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::String(_) => None,
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => {
            warn!("Dropping {}: expected text, got {}", field, other);
            None
        }
    }
}

fn parsed<T: std::str::FromStr<Err = String>>(field: &str, value: &Value) -> Option<T> {
    let s = value.as_str()?;
    match s.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Dropping {}: {}", field, e);
            None
        }
    }
}

fn count(field: &str, value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 => Some(n.round() as u32),
        _ => {
            warn!("Dropping {}: not a non-negative count ({})", field, value);
            None
        }
    }
}

fn price(field: &str, value: &Value) -> Option<u64> {
    let amount = match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64),
        Value::String(s) => parse_amount(s),
        _ => None,
    };
    if amount.is_none() {
        warn!("Dropping {}: not a non-negative amount ({})", field, value);
    }
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from(value: Value) -> StructuredFilter {
        StructuredFilter::from_model_object(value.as_object().unwrap())
    }

    #[test]
    fn amounts_in_indian_units() {
        assert_eq!(parse_amount("2 crore"), Some(20_000_000));
        assert_eq!(parse_amount("2 Crores"), Some(20_000_000));
        assert_eq!(parse_amount("20000000"), Some(20_000_000));
        assert_eq!(parse_amount("1.5cr"), Some(15_000_000));
        assert_eq!(parse_amount("85 lakhs"), Some(8_500_000));
        assert_eq!(parse_amount("₹ 85,00,000"), Some(8_500_000));
        assert_eq!(parse_amount("Rs. 50k"), Some(50_000));
        assert_eq!(parse_amount("a lot"), None);
        assert_eq!(parse_amount("2 gazillion"), None);
    }

    #[test]
    fn snake_and_camel_keys_both_read() {
        let snake = from(json!({ "bedrooms_min": 2, "price_max": 5000000 }));
        let camel = from(json!({ "bedroomsMin": 2, "priceMax": 5000000 }));
        assert_eq!(snake, camel);
        assert_eq!(snake.bedrooms_min, Some(2));
    }

    #[test]
    fn bad_fields_are_dropped_individually() {
        let filter = from(json!({
            "city": "Mumbai",
            "propertyType": "Castle",
            "bedrooms_min": -1,
            "area": "   ",
            "price_max": "2 crores"
        }));

        assert_eq!(
            filter,
            StructuredFilter {
                city: Some("Mumbai".into()),
                price_max: Some(20_000_000),
                ..Default::default()
            }
        );
    }

    #[test]
    fn inverted_bedroom_range_is_swapped() {
        let filter = from(json!({ "bedrooms_min": 4, "bedrooms_max": 2 }));
        assert_eq!(filter.bedrooms_min, Some(2));
        assert_eq!(filter.bedrooms_max, Some(4));
    }

    #[test]
    fn amenity_lists_are_joined() {
        let filter = from(json!({ "amenities": ["parking", " garden "] }));
        assert_eq!(filter.amenities.as_deref(), Some("parking, garden"));
    }

    #[test]
    fn serializes_with_camel_case_and_omits_absent_fields() {
        let filter = StructuredFilter {
            bedrooms_min: Some(3),
            transaction_type: Some(TransactionType::Rent),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "bedroomsMin": 3, "transactionType": "rent" })
        );
        assert_eq!(serde_json::to_string(&StructuredFilter::default()).unwrap(), "{}");
    }
}
