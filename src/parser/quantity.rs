// Quantity, unit and pack-size extraction from offer text
use crate::model::{Extraction, MeasureUnit};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// "2 x 1,5 l", "3x70g", "6 × 0.33-L"
    static ref MULTI_PACK: Regex = Regex::new(
        r"(\d+)\s*[x×]\s*(\d+(?:[.,]\d+)?)\s*-?\s*(kg|kilogramm|kilo|gramm|gr|g|ml|liter|ltr|l|stück|stk|st)\b"
    ).unwrap();

    /// "500g", "1,5 l", "250-g-Packung", "2 Stück"
    static ref SINGLE_QUANTITY: Regex = Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*-?\s*(kg|kilogramm|kilo|gramm|gr|g|ml|liter|ltr|l|stück|stk|st)\b"
    ).unwrap();

    /// "6er Pack", "10er-Schale", "4er Netz"
    static ref PACK_COUNT: Regex = Regex::new(
        r"(\d+)\s*er\s*-?\s*(packung|pack|pkg|tray|kiste|beutel|netz|schale)"
    ).unwrap();

    static ref BARE_PIECE: Regex = Regex::new(r"\b(stück|stk|st)\b").unwrap();
    static ref BARE_PACK: Regex = Regex::new(r"(packung|\bpkg)\b").unwrap();
    static ref BARE_BOTTLE: Regex = Regex::new(r"flasche").unwrap();
    static ref BARE_BUNCH: Regex = Regex::new(r"\bbund\b").unwrap();
}

/// Pattern rules in priority order. The first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityRule {
    MultiPack,
    SingleQuantity,
    PackCount,
    BareUnit,
}

impl QuantityRule {
    /// Multipacks must be tried before single quantities, otherwise
    /// "2 x 1.5L" would be read as a plain "1.5L".
    pub const ORDERED: [QuantityRule; 4] = [
        QuantityRule::MultiPack,
        QuantityRule::SingleQuantity,
        QuantityRule::PackCount,
        QuantityRule::BareUnit,
    ];

    /// Applies this single rule to already case-folded text.
    pub fn apply(self, text: &str) -> Option<Extraction> {
        match self {
            QuantityRule::MultiPack => {
                let caps = MULTI_PACK.captures(text)?;
                Some(Extraction {
                    quantity: Some(parse_quantity(&caps[2])?),
                    unit: Some(unit_token(&caps[3])?),
                    multiplicity: count(&caps, 1)?,
                })
            }
            QuantityRule::SingleQuantity => {
                let caps = SINGLE_QUANTITY.captures(text)?;
                Some(Extraction {
                    quantity: Some(parse_quantity(&caps[1])?),
                    unit: Some(unit_token(&caps[2])?),
                    multiplicity: 1,
                })
            }
            QuantityRule::PackCount => {
                let caps = PACK_COUNT.captures(text)?;
                Some(Extraction {
                    quantity: Some(1.0),
                    unit: Some(MeasureUnit::Piece),
                    multiplicity: count(&caps, 1)?,
                })
            }
            QuantityRule::BareUnit => {
                let unit = [
                    (&*BARE_PIECE, MeasureUnit::Piece),
                    (&*BARE_PACK, MeasureUnit::Pack),
                    (&*BARE_BOTTLE, MeasureUnit::Bottle),
                    (&*BARE_BUNCH, MeasureUnit::Bunch),
                ]
                .into_iter()
                .find(|(re, _)| re.is_match(text))
                .map(|(_, unit)| unit)?;
                Some(Extraction {
                    quantity: Some(1.0),
                    unit: Some(unit),
                    multiplicity: 1,
                })
            }
        }
    }
}

/// Returns the first matching rule together with what it extracted.
pub fn classify(text: &str) -> Option<(QuantityRule, Extraction)> {
    let folded = text.to_lowercase();
    QuantityRule::ORDERED
        .into_iter()
        .find_map(|rule| rule.apply(&folded).map(|extraction| (rule, extraction)))
}

/// Scans offer text for quantity, unit and items per pack.
/// Falls back to no quantity, no unit and a multiplicity of 1.
pub fn extract_quantity(text: &str) -> Extraction {
    classify(text)
        .map(|(_, extraction)| extraction)
        .unwrap_or_else(Extraction::none)
}

/// Maps a matched unit token to its unit. Synonyms collapse here.
pub fn unit_token(token: &str) -> Option<MeasureUnit> {
    match token {
        "g" | "gr" | "gramm" => Some(MeasureUnit::Gram),
        "kg" | "kilo" | "kilogramm" => Some(MeasureUnit::Kilogram),
        "ml" => Some(MeasureUnit::Milliliter),
        "l" | "ltr" | "liter" => Some(MeasureUnit::Liter),
        "st" | "stk" | "stück" => Some(MeasureUnit::Piece),
        _ => None,
    }
}

/// Quantities are never thousands-grouped, so either separator is the decimal point.
fn parse_quantity(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok()
}

fn count(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extraction(quantity: f64, unit: MeasureUnit, multiplicity: u32) -> Extraction {
        Extraction {
            quantity: Some(quantity),
            unit: Some(unit),
            multiplicity,
        }
    }

    #[test]
    fn single_quantity() {
        assert_eq!(extract_quantity("500g"), extraction(500.0, MeasureUnit::Gram, 1));
        assert_eq!(extract_quantity("1,5 Liter"), extraction(1.5, MeasureUnit::Liter, 1));
        assert_eq!(extract_quantity("250-g-Packung"), extraction(250.0, MeasureUnit::Gram, 1));
        assert_eq!(extract_quantity("0.75 l Flasche"), extraction(0.75, MeasureUnit::Liter, 1));
    }

    #[test]
    fn multipack_wins_over_single_quantity() {
        assert_eq!(extract_quantity("2 x 1.5L"), extraction(1.5, MeasureUnit::Liter, 2));
        assert_eq!(extract_quantity("3x70g"), extraction(70.0, MeasureUnit::Gram, 3));
        let (rule, _) = classify("2 x 1.5L").unwrap();
        assert_eq!(rule, QuantityRule::MultiPack);
    }

    #[test]
    fn pack_count() {
        assert_eq!(extract_quantity("6er Pack"), extraction(1.0, MeasureUnit::Piece, 6));
        assert_eq!(extract_quantity("Eier 10er-Schale"), extraction(1.0, MeasureUnit::Piece, 10));
    }

    #[test]
    fn bare_unit_keywords() {
        assert_eq!(extract_quantity("Gurke Stück"), extraction(1.0, MeasureUnit::Piece, 1));
        assert_eq!(extract_quantity("Vorteilspackung"), extraction(1.0, MeasureUnit::Pack, 1));
        assert_eq!(extract_quantity("Glasflasche"), extraction(1.0, MeasureUnit::Bottle, 1));
        assert_eq!(extract_quantity("Radieschen Bund"), extraction(1.0, MeasureUnit::Bunch, 1));
    }

    #[test]
    fn unit_tokens_need_a_word_boundary() {
        // "st" inside "Wurst" and "l" inside "Vollmilch" are no units
        assert_eq!(extract_quantity("Bratwurst"), Extraction::none());
        assert_eq!(extract_quantity("3 Vollmilch"), Extraction::none());
    }

    #[test]
    fn no_match_defaults() {
        let none = extract_quantity("Rispentomaten");
        assert_eq!(none.quantity, None);
        assert_eq!(none.unit, None);
        assert_eq!(none.multiplicity, 1);
        assert!(classify("").is_none());
    }

    #[test]
    fn each_rule_is_testable_on_its_own() {
        assert!(QuantityRule::SingleQuantity.apply("2 x 1.5l").is_some());
        assert!(QuantityRule::PackCount.apply("500g").is_none());
        assert!(QuantityRule::BareUnit.apply("6er pack").is_none());
    }

    #[test]
    fn synonyms_collapse() {
        assert_eq!(unit_token("stk"), Some(MeasureUnit::Piece));
        assert_eq!(unit_token("stück"), Some(MeasureUnit::Piece));
        assert_eq!(unit_token("liter"), Some(MeasureUnit::Liter));
        assert_eq!(unit_token("oz"), None);
    }
}
