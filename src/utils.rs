use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static DOLLAR_AMOUNT: OnceLock<Regex> = OnceLock::new();

/// Parses a weekly-hours field as an integer. Surrounding whitespace and a
/// leading sign are accepted; anything else (including "12.5") is `None`.
pub fn parse_weekly_hours(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok()
}

/// Extracts the first `$<number>` amount from a free-text pay range.
pub fn extract_min_pay(raw: Option<&str>) -> Option<f64> {
    let re = DOLLAR_AMOUNT.get_or_init(|| {
        Regex::new(r"\$([0-9]+(?:\.[0-9]+)?)").expect("dollar amount pattern is valid")
    });
    let caps = re.captures(raw?)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Lowercased field contents; a missing field reads as the empty string.
pub fn lowered(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_lowercase()
}

/// Distinct whitespace-separated words of a lowercased title.
pub fn title_words(title: &str) -> HashSet<&str> {
    title.split_whitespace().collect()
}
