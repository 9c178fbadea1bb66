// Analyzer module: ranking and shopping-list aggregation over normalized offers.

pub mod ranking;
pub mod shopping;

use crate::model::{CanonicalUnit, MatchedItem, NormalizedOffer};
pub use ranking::{cheapest_per_unit, rank_by_unit_price};
pub use shopping::{resolve_matches, summarize, ShoppingSummary};

/// Trait defining the interface for an offer analyzer.
pub trait Analyzer {
    fn rank<'a>(&self, offers: &'a [NormalizedOffer]) -> Vec<&'a NormalizedOffer>;
    fn cheapest<'a>(&self, offers: &'a [NormalizedOffer]) -> Vec<(CanonicalUnit, &'a NormalizedOffer)>;
    fn summarize(&self, matched: &[MatchedItem], unmatched_count: usize) -> ShoppingSummary;
}

/// Default analyzer, totals in a fixed currency.
pub struct AnalyzerImpl {
    currency: String,
}

impl AnalyzerImpl {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }
}

impl Analyzer for AnalyzerImpl {
    fn rank<'a>(&self, offers: &'a [NormalizedOffer]) -> Vec<&'a NormalizedOffer> {
        rank_by_unit_price(offers)
    }

    fn cheapest<'a>(&self, offers: &'a [NormalizedOffer]) -> Vec<(CanonicalUnit, &'a NormalizedOffer)> {
        cheapest_per_unit(offers)
    }

    fn summarize(&self, matched: &[MatchedItem], unmatched_count: usize) -> ShoppingSummary {
        summarize(matched, unmatched_count, &self.currency)
    }
}
