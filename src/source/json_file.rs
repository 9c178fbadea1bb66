use crate::model::{RawOfferRecord, ShoppingMatch, SourceError};
use crate::source::traits::{MatchSource, OfferSource};
use crate::utils::strip_code_fence;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::{info, warn};

/// Reads a JSON list from disk, as written by the extraction collaborator.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_list<T: DeserializeOwned>(&self) -> Result<Vec<T>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let items: Vec<T> = parse_list(&content)?;
        info!("Loaded {} entries from {}", items.len(), self.path.display());
        Ok(items)
    }
}

#[async_trait::async_trait]
impl OfferSource for JsonFileSource {
    async fn load_offers(&self) -> Result<Vec<RawOfferRecord>, SourceError> {
        self.read_list().await
    }
}

#[async_trait::async_trait]
impl MatchSource for JsonFileSource {
    async fn load_matches(&self) -> Result<Vec<ShoppingMatch>, SourceError> {
        self.read_list().await
    }
}

/// Parses a (possibly code-fenced) JSON array. Entries that do not fit the
/// target shape are skipped with a warning instead of failing the batch.
pub fn parse_list<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, SourceError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(content))?;
    let serde_json::Value::Array(entries) = value else {
        return Err(SourceError::NotAList);
    };

    let mut items = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(item) => items.push(item),
            Err(e) => warn!("Skipping entry {}: {}", idx, e),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_offer_list() {
        let content = "```json\n[{\"product_name\": \"Milch\", \"price\": \"0.95\", \"unit\": \"Liter\", \"offer_condition\": null}]\n```";
        let offers: Vec<RawOfferRecord> = parse_list(content).unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].price_text, "0.95");
    }

    #[test]
    fn skips_malformed_entries() {
        let offers: Vec<RawOfferRecord> =
            parse_list(r#"[{"product_name": "A"}, 42, {"price": "1,00"}]"#).unwrap();
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[1].price_text, "1,00");
    }

    #[test]
    fn object_payload_is_not_a_list() {
        let result: Result<Vec<RawOfferRecord>, _> = parse_list(r#"{"offers": []}"#);
        assert!(matches!(result, Err(SourceError::NotAList)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result: Result<Vec<RawOfferRecord>, _> = parse_list("not json");
        assert!(matches!(result, Err(SourceError::Json(_))));
    }

    #[tokio::test]
    async fn loads_matches_from_disk() {
        let path = std::env::temp_dir().join(format!("flyer-deals-matches-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"user_item": "Milch", "matched_offer": {"product_name": "Vollmilch", "price": "0,95"}},
                {"user_item": "Kaffee", "match_error": "AI matched a name not in the list"}]"#,
        )
        .await
        .unwrap();

        let matches = JsonFileSource::new(&path).load_matches().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].matched_offer.as_ref().unwrap().product_name, "Vollmilch");
        assert!(matches[1].matched_offer.is_none());
        assert!(matches[1].match_error.is_some());
    }
}
