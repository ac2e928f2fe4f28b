//! Title extraction from free-text citations

use lazy_static::lazy_static;
use regex::Regex;

/// Straight and curly quotes in English and Turkish conventions
const QUOTE_CHARS: &[char] = &['"', '\'', '“', '”', '„', '‘', '’'];

/// Punctuation removed from the end of a title
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Characters taken by the last-resort fallback
const FALLBACK_CHARS: usize = 80;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#"["'“”„‘’]([^"'“”„‘’]+)["'“”„‘’]?"#).unwrap();

    // "Title, Surname Initial..." where the second segment looks like a name
    static ref BEFORE_AUTHOR: Regex =
        Regex::new(r"^([^,]+),\s*[A-ZÇĞIİÖŞÜçğıiöşü][^,]*\s*(?:Ç|[A-Z])").unwrap();

    // "Title, in ..." or "Title, <Venue> Journal|Conference|..."
    static ref BEFORE_VENUE: Regex = Regex::new(
        r"(?i)^([^,]+)(?:,\s*(?:in\s+|[A-ZÇĞIİÖŞÜ][^,]*\s+(?:Journal|Conference|Proceedings|Book|Dergisi|Araştırmaları)))"
    )
    .unwrap();
}

/// Extracts a publication title from citation text.
///
/// Strategies, in order: quoted text, a leading segment followed by an
/// author-like name, a leading segment followed by a venue keyword, a leading
/// segment followed by a known author surname, and finally the first 80
/// characters cut at the first comma.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    before_surname: Option<Regex>,
}

impl TitleExtractor {
    /// Create an extractor that recognizes the given author surnames
    pub fn new(known_surnames: &[String]) -> Self {
        let before_surname = if known_surnames.is_empty() {
            None
        } else {
            let alternatives: Vec<String> =
                known_surnames.iter().map(|s| regex::escape(s)).collect();
            let pattern = format!(
                r"^([^,]+),\s*[A-ZÇĞIİÖŞÜçğıiöşü][^,]*(?:{})",
                alternatives.join("|")
            );
            // Escaped literals cannot produce an invalid pattern
            Regex::new(&pattern).ok()
        };
        Self { before_surname }
    }

    /// Extract and normalize the title of a citation
    pub fn extract(&self, text: &str) -> String {
        if let Some(m) = QUOTED.captures(text).and_then(|c| c.get(1)) {
            return normalize_title(m.as_str());
        }

        if let Some(m) = BEFORE_AUTHOR.captures(text).and_then(|c| c.get(1)) {
            let candidate = m.as_str().trim().trim_matches(QUOTE_CHARS).trim();
            if candidate.chars().count() > 5 {
                return normalize_title(candidate);
            }
        }

        if let Some(m) = BEFORE_VENUE.captures(text).and_then(|c| c.get(1)) {
            return normalize_title(m.as_str());
        }

        if let Some(m) = self
            .before_surname
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|c| c.get(1))
        {
            return normalize_title(m.as_str());
        }

        let head: String = text.chars().take(FALLBACK_CHARS).collect();
        let head = head.trim();
        let head = head.split(',').next().unwrap_or(head);
        normalize_title(head)
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Normalize an extracted title: strip surrounding quotes, collapse
/// whitespace runs, and drop trailing punctuation.
pub fn normalize_title(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches(QUOTE_CHARS);
    let collapsed = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(TRAILING_PUNCTUATION)
        .trim()
        .to_string()
}
