use crate::model::{CanonicalUnit, MeasureUnit, NormalizedOffer, RawOfferRecord};
use crate::parser::{classify, parse_price, resolve_condition};
use crate::utils::{fold_offer_text, round_cents};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, trace};

pub const ORIGINAL_PRICE_NOTE: &str = "original price used";
pub const UNPARSEABLE_PRICE_NOTE: &str = "could not parse price";

lazy_static! {
    static ref PER_100_G: Regex =
        Regex::new(r"(?:pro|je|per|/)\s*100\s*-?\s*g(?:r|ramm)?\b|100\s*g\s*=").unwrap();
    static ref PER_KG: Regex =
        Regex::new(r"(?:pro|je|per|/)\s*(?:kg|kilo(?:gramm)?)\b|^\s*(?:kg|kilo(?:gramm)?)\s*$").unwrap();
    static ref PER_LITER: Regex =
        Regex::new(r"(?:pro|je|per|/)\s*(?:l|ltr|liter)\b|^\s*(?:l|ltr|liter)\s*$").unwrap();
}

/// Unit price for one branch, before rounding.
struct UnitPrice {
    unit: CanonicalUnit,
    /// `None` when the arithmetic could not be carried out.
    price: Option<Decimal>,
    note: String,
}

pub fn normalize_all(records: &[RawOfferRecord]) -> Vec<NormalizedOffer> {
    records.iter().map(standardize_offer).collect()
}

/// Turns one raw offer into a price per canonical unit.
///
/// Never fails: unparseable prices and unknown units come back as a degraded
/// offer with an explanatory note. Identical input gives identical output.
pub fn standardize_offer(record: &RawOfferRecord) -> NormalizedOffer {
    let Some(parsed_price) = parse_price(&record.price_text) else {
        debug!("Unparseable price {:?} for {:?}", record.price_text, record.product_name);
        return NormalizedOffer {
            raw: record.clone(),
            calculated_price: None,
            comparable_unit: CanonicalUnit::Unknown(record.unit_text.clone()),
            standardized_unit_price: None,
            notes: vec![UNPARSEABLE_PRICE_NOTE.to_string()],
        };
    };

    let mut notes = Vec::new();

    let calculated_price = match resolve_condition(&record.condition_text, parsed_price) {
        Some(bulk) => {
            notes.push(bulk.note);
            bulk.effective_price
        }
        None => {
            notes.push(ORIGINAL_PRICE_NOTE.to_string());
            parsed_price
        }
    };

    let search_text = fold_offer_text(&record.product_name, &record.unit_text, &record.condition_text);
    let (quantity, unit, multiplicity) = match classify(&search_text) {
        Some((rule, extraction)) => {
            trace!("{:?} matched {:?}", rule, search_text);
            (extraction.quantity, extraction.unit, extraction.multiplicity)
        }
        None => (None, None, 1),
    };

    let mut working_price = calculated_price;
    if multiplicity > 1 && unit == Some(MeasureUnit::Piece) {
        if let Some(per_item) = working_price.checked_div(Decimal::from(multiplicity)) {
            working_price = per_item;
            notes.push(format!("priced per item from {}-pack", multiplicity));
        }
    }

    let branch = match (unit, quantity) {
        (Some(unit), Some(quantity)) => per_measure(unit, quantity, working_price)
            .or_else(|| per_base_marker(record, working_price)),
        _ => per_base_marker(record, working_price),
    };

    let (comparable_unit, standardized_unit_price) = match branch {
        Some(UnitPrice { unit, price: Some(price), note }) => {
            notes.push(note);
            (unit, round_cents(price))
        }
        Some(UnitPrice { unit, price: None, note }) => {
            notes.push(note);
            notes.push("unit price not computable, using working price".to_string());
            (unit, working_price)
        }
        None => {
            debug!("No unit for {:?} / {:?}", record.product_name, record.unit_text);
            notes.push(format!(
                "could not fully standardize (unit: '{}', product: '{}', condition: '{}')",
                record.unit_text.trim(),
                record.product_name.trim(),
                record.condition_text.trim()
            ));
            (CanonicalUnit::Unknown(record.unit_text.clone()), working_price)
        }
    };

    NormalizedOffer {
        raw: record.clone(),
        calculated_price: Some(calculated_price),
        comparable_unit,
        standardized_unit_price: Some(standardized_unit_price),
        notes,
    }
}

/// Price per kg, L or item from an extracted quantity. Zero or negative
/// quantities yield `None`, same as when no unit was found.
fn per_measure(unit: MeasureUnit, quantity: f64, price: Decimal) -> Option<UnitPrice> {
    if !(quantity > 0.0) {
        return None;
    }
    let amount = Decimal::from_f64(quantity);
    let per_amount = amount.and_then(|q| price.checked_div(q));
    let thousand = Decimal::from(1000);

    let result = match unit {
        MeasureUnit::Gram => UnitPrice {
            unit: CanonicalUnit::Kilogram,
            price: per_amount.and_then(|p| p.checked_mul(thousand)),
            note: format!("converted to price per kg from {}g", quantity),
        },
        MeasureUnit::Milliliter => UnitPrice {
            unit: CanonicalUnit::Liter,
            price: per_amount.and_then(|p| p.checked_mul(thousand)),
            note: format!("converted to price per L from {}ml", quantity),
        },
        MeasureUnit::Kilogram => UnitPrice {
            unit: CanonicalUnit::Kilogram,
            price: per_amount,
            note: format!("price per kg (original {}kg)", quantity),
        },
        MeasureUnit::Liter => UnitPrice {
            unit: CanonicalUnit::Liter,
            price: per_amount,
            note: format!("price per L (original {}L)", quantity),
        },
        MeasureUnit::Piece | MeasureUnit::Pack | MeasureUnit::Bottle | MeasureUnit::Bunch => {
            let unit = match unit {
                MeasureUnit::Pack => CanonicalUnit::Pack,
                MeasureUnit::Bottle => CanonicalUnit::Bottle,
                MeasureUnit::Bunch => CanonicalUnit::Bunch,
                _ => CanonicalUnit::Piece,
            };
            UnitPrice {
                note: format!("price per {} (original {} {})", unit, quantity, unit),
                unit,
                price: per_amount,
            }
        }
    };
    Some(result)
}

/// Fallback when no quantity was found: look for "pro 100 g", "je kg" and
/// similar base-price markers in the unit and condition fields.
fn per_base_marker(record: &RawOfferRecord, price: Decimal) -> Option<UnitPrice> {
    let unit_text = record.unit_text.to_lowercase();
    let condition_text = record.condition_text.to_lowercase();
    let has = |re: &Regex| re.is_match(&unit_text) || re.is_match(&condition_text);

    if has(&*PER_100_G) {
        Some(UnitPrice {
            unit: CanonicalUnit::Kilogram,
            price: price.checked_mul(Decimal::from(10)),
            note: "converted to price per kg from 100g price".to_string(),
        })
    } else if has(&*PER_KG) {
        Some(UnitPrice {
            unit: CanonicalUnit::Kilogram,
            price: Some(price),
            note: "price is per kg".to_string(),
        })
    } else if has(&*PER_LITER) {
        Some(UnitPrice {
            unit: CanonicalUnit::Liter,
            price: Some(price),
            note: "price is per L".to_string(),
        })
    } else {
        None
    }
}
