/// How far a decimal may sit from a table entry and still snap to it.
pub const DEFAULT_FRACTION_TOLERANCE: f64 = 0.01;

/// Fractions that show up on cocktail specs, as (value, display) pairs.
const COMMON_FRACTIONS: &[(f64, &str)] = &[
    (1.0 / 4.0, "1/4"),
    (1.0 / 3.0, "1/3"),
    (3.0 / 8.0, "3/8"),
    (1.0 / 2.0, "1/2"),
    (5.0 / 8.0, "5/8"),
    (2.0 / 3.0, "2/3"),
    (3.0 / 4.0, "3/4"),
];

/// Convert a plain decimal quantity to its common-fraction spelling.
///
/// `"0.75"` becomes `"3/4"` and `"2.5"` becomes `"2 1/2"`. Anything that is not
/// a plain decimal (fractions, ranges, words) is returned unchanged, and so is
/// a decimal whose fractional part is not within `tolerance` of a table entry.
pub fn normalize_quantity(quantity: &str, tolerance: f64) -> String {
    let trimmed = quantity.trim();
    let Some((whole, fraction)) = split_plain_decimal(trimmed) else {
        return quantity.to_string();
    };
    if !trimmed.contains('.') {
        return trimmed.to_string();
    }

    // The whole part is kept as written; only the digits after the point go
    // through floating point.
    let whole = if whole.is_empty() { "0" } else { whole };
    if fraction <= tolerance {
        return whole.to_string();
    }
    if 1.0 - fraction <= tolerance {
        return increment_digits(whole);
    }

    let snapped = COMMON_FRACTIONS
        .iter()
        .map(|(target, display)| ((fraction - target).abs(), *display))
        .filter(|(distance, _)| *distance <= tolerance)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    match snapped {
        Some((_, display)) if whole.chars().all(|c| c == '0') => display.to_string(),
        Some((_, display)) => format!("{} {}", whole, display),
        None => trimmed.to_string(),
    }
}

/// Split strings made only of ASCII digits with at most one decimal point
/// into the whole-part digits and the value of the fractional part.
///
/// `str::parse::<f64>` alone would also accept "inf", "1e3" and signs.
fn split_plain_decimal(s: &str) -> Option<(&str, f64)> {
    let (whole, decimals) = s.split_once('.').unwrap_or((s, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && decimals.is_empty()) || !all_digits(whole) || !all_digits(decimals) {
        return None;
    }
    if decimals.is_empty() {
        return Some((whole, 0.0));
    }
    let fraction = format!("0.{}", decimals).parse::<f64>().ok()?;
    Some((whole, fraction))
}

/// Add one to a string of decimal digits.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for c in out.iter_mut().rev() {
        if *c == '9' {
            *c = '0';
        } else {
            *c = (*c as u8 + 1) as char;
            return out.into_iter().collect();
        }
    }
    out.insert(0, '1');
    out.into_iter().collect()
}
