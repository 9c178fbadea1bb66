// Bulk-buy promotions: "2 Stück für 1,80", "3 zum Preis von 5", "2 for 3.00"
use crate::parser::price::parse_price;
use crate::utils::round_cents;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

lazy_static! {
    /// The count may not start inside a decimal such as "2,49".
    static ref BULK_PRICE: Regex = Regex::new(
        r"(?:^|[^\d.,])(\d+)\s*(?:stück|stk|st\.?|packungen|packung|pkg|flaschen|x)?\s*(?:für|zum preis von|nur|for|at)\s*(\d+(?:[.,]\d+)?)"
    ).unwrap();
}

/// Per-item price derived from a bundle offer.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkPrice {
    pub effective_price: Decimal,
    pub note: String,
}

/// Rewrites the working price when the condition offers N items for a total M.
///
/// Only "N for M" phrasing is handled; "pro 100 g" style base prices are
/// resolved later by the standardizer. A bundle of zero items, or one whose
/// count or total does not parse, counts as no match.
pub fn resolve_condition(condition_text: &str, base_price: Decimal) -> Option<BulkPrice> {
    let folded = condition_text.to_lowercase();
    let caps = BULK_PRICE.captures(&folded)?;

    let items = caps[1].parse::<u32>().ok().filter(|n| *n > 0)?;
    let total = parse_price(&caps[2])?;
    let effective_price = total.checked_div(Decimal::from(items))?;

    Some(BulkPrice {
        effective_price,
        note: format!(
            "original: {} for {:.2}€ (single price {:.2}€), effective price per item: {:.2}€",
            items,
            round_cents(total),
            round_cents(base_price),
            round_cents(effective_price)
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn splits_bundle_price() {
        let bulk = resolve_condition("2 Stück für 1.80", dec("0.95")).unwrap();
        assert_eq!(bulk.effective_price, dec("0.90"));
        assert!(bulk.note.contains("2 for 1.80€"));
        assert!(bulk.note.contains("effective price per item: 0.90€"));
    }

    #[test]
    fn accepts_equivalent_phrasings() {
        let base = dec("2.49");
        assert_eq!(
            resolve_condition("Beim Kauf von 2 Stück nur 1,80€", base).map(|b| b.effective_price),
            Some(dec("0.9"))
        );
        assert_eq!(
            resolve_condition("3 zum Preis von 5", base).map(|b| b.effective_price),
            Some(dec("5") / dec("3"))
        );
        assert_eq!(
            resolve_condition("4 packungen für 10,00", base).map(|b| b.effective_price),
            Some(dec("2.5"))
        );
        assert_eq!(
            resolve_condition("2 for 3.00", base).map(|b| b.effective_price),
            Some(dec("1.5"))
        );
    }

    #[test]
    fn zero_items_is_no_match() {
        assert_eq!(resolve_condition("0 für 1,00", dec("1")), None);
    }

    #[test]
    fn unparseable_count_is_no_match() {
        assert_eq!(resolve_condition("99999999999 für 1", dec("1")), None);
    }

    #[test]
    fn strike_through_prices_are_not_bundles() {
        assert_eq!(resolve_condition("statt 2,49 nur 1,99", dec("1.99")), None);
        assert_eq!(resolve_condition("UVP 3.99 für 2.99", dec("2.99")), None);
    }

    #[test]
    fn other_conditions_are_ignored() {
        assert_eq!(resolve_condition("pro 100g", dec("1.29")), None);
        assert_eq!(resolve_condition("solange der Vorrat reicht", dec("1.29")), None);
        assert_eq!(resolve_condition("", dec("1.29")), None);
    }

    #[test]
    fn note_rounds_to_cents() {
        let bulk = resolve_condition("3 für 1,99", dec("0.79")).unwrap();
        assert!(bulk.note.contains("effective price per item: 0.66€"));
    }
}
