//! Human-readable duration parsing for cache expiration
//!
//! Converts strings like `"1 month"` into a count of seconds. Each unit's
//! factor is its size in the next-smaller unit (1 year = 12 months,
//! 1 month = 30 days, and so on), so a matched unit is converted down to
//! seconds by compounding every factor that follows it in the table.

/// Units of conversion, largest first. The factor stored with a unit is
/// how many of it fit in the next-larger unit, which is why `year` carries
/// a factor of 1: its own factor is never applied, only the ones after it.
const CONVERSIONS: [(&str, u64); 6] = [
    ("year", 1),
    ("month", 12),
    ("day", 30),
    ("hour", 24),
    ("minute", 60),
    ("second", 60),
];

/// Convert a duration string ("1 month", "30 seconds") to seconds.
///
/// The magnitude is the leading run of ASCII digits; the unit is found by
/// case-insensitive substring match against the table. Once a unit matches,
/// the magnitude is multiplied by the factor of every unit that follows it.
/// If no unit matches, the raw magnitude is returned unchanged.
pub fn to_seconds(duration: &str) -> u64 {
    let trimmed = duration.trim();

    let digits: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let magnitude: u64 = digits.parse().unwrap_or(0);

    let unit_part = trimmed[digits.len()..].to_lowercase();

    let mut value = magnitude;
    let mut matched = false;
    for (unit, factor) in CONVERSIONS {
        let mut step = factor;
        if unit_part.contains(unit) {
            matched = true;
            // The matched unit's own table factor is skipped.
            step = 1;
        }
        if matched {
            value *= step;
        }
    }

    value
}
