//! Journal name extraction and journal-domain lookup

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Domain searched when a journal has no entry in the domain table
pub const DEFAULT_SEARCH_DOMAIN: &str = "scholar.google.com";

lazy_static! {
    // A comma-delimited segment carrying a journal keyword, followed by a
    // volume or page marker (English and Turkish forms).
    static ref JOURNAL_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i),\s*([^,]+(?:Journal|Review|Proceedings|Conference)[^,]*),\s*(?:cilt|vol|volume|pp|p\.|ss\.)"
        )
        .unwrap(),
        Regex::new(r"(?i),\s*([^,]+(?:Dergisi|Araştırmaları)[^,]*),\s*(?:cilt|vol|volume|pp|p\.|ss\.)")
            .unwrap(),
        Regex::new(
            r"(?i),\s*([A-Z][^,]*(?:Economics|Agricultural|Tourism|Issues)[^,]*),\s*(?:cilt|vol|volume|pp|p\.|ss\.)"
        )
        .unwrap(),
    ];
}

/// A journal name and the website its articles live on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDomain {
    pub name: String,
    pub domain: String,
}

impl JournalDomain {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// The journals the site's publications appear in most often
pub fn default_journal_domains() -> Vec<JournalDomain> {
    vec![
        JournalDomain::new("Tarım Ekonomisi Araştırmaları Dergisi", "tarimsalekonomi.org.tr"),
        JournalDomain::new("Journal of Agricultural Sciences", "agri.ankara.edu.tr"),
        JournalDomain::new("Current Issues in Tourism", "tandfonline.com"),
        JournalDomain::new("Woman and Criminal Justice Journal", "tandfonline.com"),
        JournalDomain::new("Sosyoekonomi", "sosyoekonomi.org"),
    ]
}

/// Extract a journal name from citation text
pub fn extract_journal_name(text: &str) -> Option<String> {
    JOURNAL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text)?.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Look up the website for a journal.
///
/// Exact name matches win; otherwise the first table entry whose name
/// contains, or is contained in, the journal name. Falls back to `default`.
pub fn journal_domain<'a>(name: &str, table: &'a [JournalDomain], default: &'a str) -> &'a str {
    if let Some(entry) = table.iter().find(|j| j.name == name) {
        return &entry.domain;
    }
    table
        .iter()
        .find(|j| name.contains(j.name.as_str()) || j.name.contains(name))
        .map(|j| j.domain.as_str())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_english_journal() {
        let text = "Export Competitiveness, S. Çağatay, Journal of Agricultural Sciences, vol. 12, pp. 1-10, 2019";
        assert_eq!(
            extract_journal_name(text).as_deref(),
            Some("Journal of Agricultural Sciences")
        );
    }

    #[test]
    fn test_extract_turkish_journal() {
        let text = "Tarım politikaları, S. Çağatay, Tarım Ekonomisi Araştırmaları Dergisi, cilt 3, ss. 5-20";
        assert_eq!(
            extract_journal_name(text).as_deref(),
            Some("Tarım Ekonomisi Araştırmaları Dergisi")
        );
    }

    #[test]
    fn test_extract_requires_volume_marker() {
        assert_eq!(extract_journal_name("A paper, Journal of Things, 2019"), None);
    }

    #[test]
    fn test_domain_exact_match() {
        let table = default_journal_domains();
        assert_eq!(
            journal_domain("Sosyoekonomi", &table, DEFAULT_SEARCH_DOMAIN),
            "sosyoekonomi.org"
        );
    }

    #[test]
    fn test_domain_substring_match_both_ways() {
        let table = default_journal_domains();
        assert_eq!(
            journal_domain("The Current Issues in Tourism Quarterly", &table, DEFAULT_SEARCH_DOMAIN),
            "tandfonline.com"
        );
        assert_eq!(
            journal_domain("Agricultural Sciences", &table, DEFAULT_SEARCH_DOMAIN),
            "agri.ankara.edu.tr"
        );
    }

    #[test]
    fn test_domain_default() {
        let table = default_journal_domains();
        assert_eq!(
            journal_domain("Food Policy", &table, DEFAULT_SEARCH_DOMAIN),
            DEFAULT_SEARCH_DOMAIN
        );
    }
}
