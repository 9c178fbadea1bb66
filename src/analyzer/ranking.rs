use crate::model::{CanonicalUnit, NormalizedOffer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Orders offers from cheapest to most expensive unit price.
///
/// Offers with a known unit come first, grouped by unit; within a unit the
/// standardized price decides. Offers without a price or with an unknown
/// unit go last. Equal offers keep their input order.
pub fn rank_by_unit_price(offers: &[NormalizedOffer]) -> Vec<&NormalizedOffer> {
    let mut ranked: Vec<&NormalizedOffer> = offers.iter().collect();
    ranked.sort_by(|a, b| compare_offers(a, b));
    ranked
}

/// Cheapest offer for every known canonical unit, in unit order.
pub fn cheapest_per_unit(offers: &[NormalizedOffer]) -> Vec<(CanonicalUnit, &NormalizedOffer)> {
    let mut best: BTreeMap<CanonicalUnit, &NormalizedOffer> = BTreeMap::new();
    for offer in offers {
        if !offer.comparable_unit.is_known() {
            continue;
        }
        let Some(price) = offer.standardized_unit_price else {
            continue;
        };
        best.entry(offer.comparable_unit.clone())
            .and_modify(|current| {
                if current.standardized_unit_price.is_none_or(|p| price < p) {
                    *current = offer;
                }
            })
            .or_insert(offer);
    }
    best.into_iter().collect()
}

fn is_rankable(offer: &NormalizedOffer) -> bool {
    offer.comparable_unit.is_known() && offer.standardized_unit_price.is_some()
}

fn compare_offers(a: &NormalizedOffer, b: &NormalizedOffer) -> Ordering {
    match (is_rankable(a), is_rankable(b)) {
        (true, true) => a
            .comparable_unit
            .cmp(&b.comparable_unit)
            .then_with(|| a.standardized_unit_price.cmp(&b.standardized_unit_price)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
