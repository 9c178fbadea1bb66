// Core structs: RawOfferRecord, NormalizedOffer, units and error types
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One offer as carved out of a circular by the upstream extraction step.
/// Every field is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOfferRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_name: String,
    #[serde(rename = "price", alias = "price_text", default, deserialize_with = "lenient_text")]
    pub price_text: String,
    #[serde(rename = "unit", alias = "unit_text", default, deserialize_with = "lenient_text")]
    pub unit_text: String,
    #[serde(
        rename = "offer_condition",
        alias = "condition_text",
        alias = "condition",
        default,
        deserialize_with = "lenient_text"
    )]
    pub condition_text: String,
}

impl RawOfferRecord {
    pub fn new(product_name: &str, price_text: &str, unit_text: &str, condition_text: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            price_text: price_text.to_string(),
            unit_text: unit_text.to_string(),
            condition_text: condition_text.to_string(),
        }
    }
}

/// Accepts strings, numbers, booleans or null. The extraction step does not
/// guarantee types, so `1.99` and `"1.99"` must both end up as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Unit as it was found in the text, before conversion to a comparable base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureUnit {
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Piece,
    Pack,
    Bottle,
    Bunch,
}

/// Result of scanning offer text for a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub quantity: Option<f64>,
    pub unit: Option<MeasureUnit>,
    pub multiplicity: u32,
}

impl Extraction {
    pub fn none() -> Self {
        Self {
            quantity: None,
            unit: None,
            multiplicity: 1,
        }
    }
}

/// Unit that standardized prices are expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalUnit {
    Kilogram,
    Liter,
    Piece,
    Pack,
    Bottle,
    Bunch,
    /// Nothing matched; carries the unit text as printed.
    Unknown(String),
}

impl CanonicalUnit {
    pub fn is_known(&self) -> bool {
        !matches!(self, CanonicalUnit::Unknown(_))
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalUnit::Kilogram => write!(f, "kg"),
            CanonicalUnit::Liter => write!(f, "L"),
            CanonicalUnit::Piece => write!(f, "Stück"),
            CanonicalUnit::Pack => write!(f, "Packung"),
            CanonicalUnit::Bottle => write!(f, "Flasche"),
            CanonicalUnit::Bunch => write!(f, "Bund"),
            CanonicalUnit::Unknown(text) if text.trim().is_empty() => write!(f, "unknown"),
            CanonicalUnit::Unknown(text) => write!(f, "{}", text.trim()),
        }
    }
}

impl Serialize for CanonicalUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Offer with a price that can be compared across units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedOffer {
    #[serde(flatten)]
    pub raw: RawOfferRecord,
    /// Price for the unit or pack as printed, after any bulk condition.
    pub calculated_price: Option<Decimal>,
    pub comparable_unit: CanonicalUnit,
    pub standardized_unit_price: Option<Decimal>,
    pub notes: Vec<String>,
}

/// Shopping-list entry as resolved by the external matcher.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShoppingMatch {
    #[serde(default)]
    pub user_item: String,
    #[serde(default)]
    pub matched_offer: Option<RawOfferRecord>,
    #[serde(default)]
    pub match_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedItem {
    pub user_item: String,
    pub matched_offer: NormalizedOffer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedItem {
    pub user_item: String,
    pub match_error: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source JSON is not a list")]
    NotAList,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
