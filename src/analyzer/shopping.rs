use crate::model::{MatchedItem, ShoppingMatch, UnmatchedItem};
use crate::pipeline::normalize_one;
use crate::utils::round_cents;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingSummary {
    pub total_cost_of_matched_items: Decimal,
    pub currency: String,
    pub number_of_matched_items: usize,
    pub number_of_unmatched_items: usize,
}

/// Normalizes every matched offer and collects list items without a match.
pub fn resolve_matches(matches: &[ShoppingMatch]) -> (Vec<MatchedItem>, Vec<UnmatchedItem>) {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for entry in matches {
        if entry.user_item.trim().is_empty() {
            continue;
        }
        match &entry.matched_offer {
            Some(offer) => matched.push(MatchedItem {
                user_item: entry.user_item.clone(),
                matched_offer: normalize_one(offer),
            }),
            None => unmatched.push(UnmatchedItem {
                user_item: entry.user_item.clone(),
                match_error: entry.match_error.clone(),
            }),
        }
    }
    (matched, unmatched)
}

/// Sums the calculated price of every matched offer. Each list item counts
/// once, at the price printed for its unit or pack.
pub fn summarize(matched: &[MatchedItem], unmatched_count: usize, currency: &str) -> ShoppingSummary {
    let total: Decimal = matched
        .iter()
        .filter_map(|item| item.matched_offer.calculated_price)
        .sum();

    ShoppingSummary {
        total_cost_of_matched_items: round_cents(total),
        currency: currency.to_string(),
        number_of_matched_items: matched.len(),
        number_of_unmatched_items: unmatched_count,
    }
}
