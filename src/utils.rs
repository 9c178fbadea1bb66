// Utility functions
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, halves away from zero (half-up for prices).
/// The result always carries two decimal places, so `0.9` becomes `0.90`.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Joins the three descriptive offer fields into one lower-cased search text.
pub fn fold_offer_text(product_name: &str, unit_text: &str, condition_text: &str) -> String {
    format!("{} {} {}", product_name, unit_text, condition_text).to_lowercase()
}

/// Strips a Markdown code fence (```` ```json ... ``` ````) around a payload.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the end of the opening line.
    let body = match rest.find('\n') {
        Some(idx) if rest[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => &rest[idx + 1..],
        _ => rest.trim_start_matches("json"),
    };
    body.trim_end().trim_end_matches("```").trim()
}
