use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listed apartments under this monthly figure are rentals, not sales.
pub const RENT_PRICE_CEILING: u64 = 10_000;

/// Kind of property a listing (or a query) refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Apartment,
    House,
    Condo,
    Villa,
    Plot,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Villa,
        PropertyType::Plot,
        PropertyType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Villa => "Villa",
            PropertyType::Plot => "Plot",
            PropertyType::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Case-insensitive, accepts simple plurals ("apartments", "villas")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        PropertyType::ALL
            .into_iter()
            .find(|t| {
                let name = t.as_str().to_lowercase();
                name == lower || name == singular
            })
            .ok_or_else(|| format!("unknown property type '{}'", s))
    }
}

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Rent,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Rent => "rent",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "sell" | "buy" | "for sale" | "purchase" => Ok(TransactionType::Sale),
            "rent" | "rental" | "lease" | "for rent" | "on rent" => Ok(TransactionType::Rent),
            _ => Err(format!("unknown transaction type '{}'", s)),
        }
    }
}

/// Core listing data model, as stored in the search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub price: u64,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    /// Built-up area in sqft
    #[serde(default)]
    pub area: u32,
    #[serde(deserialize_with = "loose_property_type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Neighbourhood within the city ("Koramangala", "Bandra West")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

impl Listing {
    /// An explicit transaction type wins; otherwise cheap apartments are rentals.
    pub fn is_for_rent(&self) -> bool {
        match self.transaction_type {
            Some(t) => t == TransactionType::Rent,
            None => self.property_type == PropertyType::Apartment && self.price < RENT_PRICE_CEILING,
        }
    }

    pub fn transaction(&self) -> TransactionType {
        if self.is_for_rent() {
            TransactionType::Rent
        } else {
            TransactionType::Sale
        }
    }
}

/// Index records may store the type as "apartment" or "Apartments"
fn loose_property_type<'de, D>(deserializer: D) -> Result<PropertyType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Index records carry ids as either `1` or `"1"`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
