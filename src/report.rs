// Output document for the presentation layer
use crate::analyzer::{resolve_matches, Analyzer, ShoppingSummary};
use crate::model::{MatchedItem, NormalizedOffer, ReportError, ShoppingMatch, UnmatchedItem};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    SuccessNoOffersFound,
    SuccessNoUserItems,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizationReport {
    pub status: ReportStatus,
    pub generated_at: DateTime<Utc>,
    pub all_offers: Vec<NormalizedOffer>,
    pub shopping_list_matches: Vec<MatchedItem>,
    pub unmatched_items: Vec<UnmatchedItem>,
    pub shopping_summary: Option<ShoppingSummary>,
}

pub fn build_report(
    all_offers: Vec<NormalizedOffer>,
    matches: &[ShoppingMatch],
    analyzer: &impl Analyzer,
    generated_at: DateTime<Utc>,
) -> NormalizationReport {
    if all_offers.is_empty() {
        // Nothing to match against: every list item stays open.
        let unmatched_items = matches
            .iter()
            .filter(|m| !m.user_item.trim().is_empty())
            .map(|m| UnmatchedItem {
                user_item: m.user_item.clone(),
                match_error: None,
            })
            .collect();
        return NormalizationReport {
            status: ReportStatus::SuccessNoOffersFound,
            generated_at,
            all_offers,
            shopping_list_matches: Vec::new(),
            unmatched_items,
            shopping_summary: None,
        };
    }

    let (matched, unmatched) = resolve_matches(matches);
    if matched.is_empty() && unmatched.is_empty() {
        return NormalizationReport {
            status: ReportStatus::SuccessNoUserItems,
            generated_at,
            all_offers,
            shopping_list_matches: matched,
            unmatched_items: unmatched,
            shopping_summary: None,
        };
    }

    let summary = analyzer.summarize(&matched, unmatched.len());
    NormalizationReport {
        status: ReportStatus::Success,
        generated_at,
        all_offers,
        shopping_list_matches: matched,
        unmatched_items: unmatched,
        shopping_summary: Some(summary),
    }
}

/// Writes the report as pretty JSON to `output_path`, or stdout when absent.
pub async fn write_report(report: &NormalizationReport, output_path: Option<&str>) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    match output_path {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            info!("Report written to {}", path);
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerImpl;
    use crate::model::RawOfferRecord;
    use crate::pipeline::normalize_batch;

    fn offers() -> Vec<NormalizedOffer> {
        normalize_batch(&[
            RawOfferRecord::new("Rispentomaten", "1.99", "kg", ""),
            RawOfferRecord::new("Vollmilch", "0.95", "1-L-Packung", "2 Stück für 1.80"),
        ])
    }

    fn list_match(item: &str, offer: Option<RawOfferRecord>) -> ShoppingMatch {
        ShoppingMatch {
            user_item: item.to_string(),
            matched_offer: offer,
            match_error: None,
        }
    }

    #[test]
    fn empty_offer_batch() {
        let report = build_report(
            Vec::new(),
            &[list_match("Milch", None)],
            &AnalyzerImpl::new("EUR"),
            Utc::now(),
        );
        assert_eq!(report.status, ReportStatus::SuccessNoOffersFound);
        assert_eq!(report.unmatched_items.len(), 1);
        assert!(report.shopping_summary.is_none());
    }

    #[test]
    fn no_user_items() {
        let report = build_report(offers(), &[], &AnalyzerImpl::new("EUR"), Utc::now());
        assert_eq!(report.status, ReportStatus::SuccessNoUserItems);
        assert_eq!(report.all_offers.len(), 2);
        assert!(report.shopping_summary.is_none());
    }

    #[test]
    fn full_report_serializes() {
        let matches = [
            list_match("Tomaten", Some(RawOfferRecord::new("Rispentomaten", "1.99", "kg", ""))),
            list_match("Zucker", None),
        ];
        let report = build_report(offers(), &matches, &AnalyzerImpl::new("EUR"), Utc::now());
        assert_eq!(report.status, ReportStatus::Success);
        let summary = report.shopping_summary.as_ref().unwrap();
        assert_eq!(summary.number_of_matched_items, 1);
        assert_eq!(summary.number_of_unmatched_items, 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["all_offers"][0]["comparable_unit"], "kg");
        assert_eq!(json["all_offers"][0]["price"], "1.99");
        assert_eq!(json["all_offers"][1]["standardized_unit_price"], "0.90");
        assert_eq!(json["shopping_summary"]["total_cost_of_matched_items"], "1.99");
    }
}
