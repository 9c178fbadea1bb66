// Price text parsing for German-style circulars
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a printed price such as `"1.234,56"`, `"ca. 2,99 €"` or `"0.95"`.
///
/// Separator policy is fixed, never guessed per writer:
/// - with a comma present, `,` is the decimal point and every `.` groups thousands;
/// - without a comma, a `.` followed by exactly three digits groups thousands
///   (`"1.234"` is 1234), any other `.` between digits is the decimal point.
///
/// Everything that is not a digit or the resulting decimal point is dropped.
/// Returns `None` when no digits are left or the remainder is not a number.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let normalized = normalize_separators(text);
    let mut cleaned: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    // "2,-" leaves a dangling point
    while cleaned.ends_with('.') {
        cleaned.pop();
    }
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }

    Decimal::from_str(&cleaned).ok()
}

fn normalize_separators(text: &str) -> String {
    if text.contains(',') {
        return text.replace('.', "").replace(',', ".");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '.' {
            out.push(c);
            continue;
        }
        let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
        let digit_after = chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
        if digit_before && digit_after && !is_thousands_group(&chars[i + 1..]) {
            out.push('.');
        }
    }
    out
}

fn is_thousands_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && rest.get(3).is_none_or(|c| !c.is_ascii_digit())
}
