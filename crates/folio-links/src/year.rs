//! Publication year inference from citation text

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::RangeInclusive;

lazy_static! {
    // Tried in order; the first pattern yielding a plausible year decides.
    static ref YEAR_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b(20\d{2})\b").unwrap(),
        Regex::new(r"\b(19\d{2})\b").unwrap(),
        Regex::new(r"Vol\.?\s*\d+.*?(\d{4})").unwrap(),
        Regex::new(r"cilt\.?\s*\d+.*?(\d{4})").unwrap(),
        Regex::new(r"pp?\.\s*\d+-\d+,?\s*(\d{4})").unwrap(),
        Regex::new(r"s[sa]?\.\s*\d+-\d+,?\s*(\d{4})").unwrap(),
    ];
}

/// Infer the publication year of a citation.
///
/// For the first pattern with any match inside `plausible`, returns the most
/// recent such year.
pub fn extract_year(text: &str, plausible: RangeInclusive<i32>) -> Option<i32> {
    YEAR_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1)?.as_str().parse::<i32>().ok())
            .filter(|year| plausible.contains(year))
            .max()
    })
}
