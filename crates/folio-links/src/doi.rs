//! DOI detection in citation text and hyperlinks

use lazy_static::lazy_static;
use regex::Regex;

/// Resolver prefix for bare DOIs
pub const DOI_RESOLVER: &str = "https://doi.org/";

lazy_static! {
    // Tried in order; the first pattern that matches anywhere in the text wins.
    // Tokens may contain interior dots; trailing punctuation is stripped later.
    static ref DOI_PATTERNS: Vec<Regex> = vec![
        // DOI: 10.1000/xyz
        Regex::new(r"(?i)DOI:\s*([^\s,()]+)").unwrap(),
        // doi.org/10.1000/xyz
        Regex::new(r"(?i)doi\.org/([^\s,()]+)").unwrap(),
        // https://doi.org/10.1000/xyz
        Regex::new(r"(?i)https?://doi\.org/([^\s,()]+)").unwrap(),
        // https://dx.doi.org/10.1000/xyz
        Regex::new(r"(?i)https?://dx\.doi\.org/([^\s,()]+)").unwrap(),
        // doi:10.1000/xyz
        Regex::new(r"(?i)\bdoi:([^\s,()]+)").unwrap(),
        // Digital Object Identifier 10.1000/xyz
        Regex::new(r"(?i)digital\s+object\s+identifier[:\s]*([^\s,()]+)").unwrap(),
    ];
}

/// Whether a hyperlink target points at the DOI resolver
pub fn is_doi_link(href: &str) -> bool {
    href.contains("doi.org")
}

/// Find the first DOI-like token in citation text.
///
/// Returns the token with trailing punctuation removed, or `None` when no
/// pattern matches (or a match is nothing but punctuation).
pub fn find_doi(text: &str) -> Option<String> {
    DOI_PATTERNS.iter().find_map(|pattern| {
        let token = pattern.captures(text)?.get(1)?.as_str();
        let cleaned = clean_doi(token);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    })
}

/// URL for a DOI token; tokens that already are URLs are used as-is
pub fn doi_url(token: &str) -> String {
    if token.starts_with("http") {
        token.to_string()
    } else {
        format!("{}{}", DOI_RESOLVER, token)
    }
}

/// Remove trailing punctuation that the token pattern captured
pub fn clean_doi(doi: &str) -> String {
    doi.trim_end_matches(&['.', ',', ';', ')'][..]).to_string()
}
