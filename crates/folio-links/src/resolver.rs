//! First-match-wins composition of link rules

use std::sync::Arc;

use folio_domain::{LinkResolution, PublicationEntry};
use serde::{Deserialize, Serialize};

use crate::journal::{default_journal_domains, JournalDomain, DEFAULT_SEARCH_DOMAIN};
use crate::rules::{
    Citation, DirectDoiRule, DoiTextRule, JournalSearchRule, LinkRule, ProfileRule,
    TitleSearchRule,
};
use crate::title::TitleExtractor;

/// Google Scholar profile of the site owner
pub const DEFAULT_PROFILE_URL: &str = "https://scholar.google.com/citations?hl=en&user=GaoGA7sAAAAJ";

/// Site-specific inputs to link resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Final fallback link
    pub profile_url: String,
    /// Appended to academic-network title searches (usually the author's name)
    pub author_query: String,
    /// Journal name to website table for journal-scoped searches
    pub journal_domains: Vec<JournalDomain>,
    /// Website searched for journals missing from the table
    pub default_search_domain: String,
    /// Author surnames that mark the end of a title segment
    pub known_surnames: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            author_query: "Selim Çağatay".to_string(),
            journal_domains: default_journal_domains(),
            default_search_domain: DEFAULT_SEARCH_DOMAIN.to_string(),
            known_surnames: vec![
                "Çağatay".to_string(),
                "Koç".to_string(),
                "Bayaner".to_string(),
            ],
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

/// Resolves the best external link for a citation.
///
/// Rules run in priority order: direct DOI link, DOI in text, journal search,
/// ResearchGate search, Academia.edu search, and the profile fallback. The
/// first rule producing a URL decides. Citations without text go straight to
/// the profile.
pub struct Resolver {
    rules: Vec<Box<dyn LinkRule>>,
    fallback: ProfileRule,
    titles: Arc<TitleExtractor>,
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Self {
        let titles = Arc::new(TitleExtractor::new(&config.known_surnames));
        let rules: Vec<Box<dyn LinkRule>> = vec![
            Box::new(DirectDoiRule),
            Box::new(DoiTextRule),
            Box::new(JournalSearchRule::new(
                Arc::clone(&titles),
                config.journal_domains.clone(),
                config.default_search_domain.clone(),
            )),
            Box::new(TitleSearchRule::research_gate(
                Arc::clone(&titles),
                config.author_query.clone(),
            )),
            Box::new(TitleSearchRule::academia(
                Arc::clone(&titles),
                config.author_query.clone(),
            )),
        ];
        Self {
            rules,
            fallback: ProfileRule::new(config.profile_url.clone()),
            titles,
        }
    }

    /// Resolve one citation. Always returns a resolution.
    pub fn resolve(&self, citation: &Citation<'_>) -> LinkResolution {
        let Some(text) = citation.text else {
            return self.profile();
        };

        let resolution = self
            .rules
            .iter()
            .find_map(|rule| {
                rule.apply(text, citation.links)
                    .map(|url| LinkResolution::new(url, rule.kind()))
            })
            .unwrap_or_else(|| self.profile());

        tracing::debug!(kind = %resolution.kind, url = %resolution.url, "resolved publication link");
        resolution
    }

    /// Resolve a publication entry's citation
    pub fn resolve_entry(&self, entry: &PublicationEntry) -> LinkResolution {
        self.resolve(&Citation::from_entry(entry))
    }

    /// Resolve bare citation text
    pub fn resolve_text(&self, text: &str) -> LinkResolution {
        self.resolve(&Citation::from_text(text))
    }

    /// The title this resolver would search for
    pub fn title(&self, text: &str) -> String {
        self.titles.extract(text)
    }

    fn profile(&self) -> LinkResolution {
        LinkResolution::new(self.fallback.url(), self.fallback.kind())
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("rules", &self.rules.iter().map(|r| r.kind()).collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::LinkKind;

    #[test]
    fn test_direct_link_beats_text_doi() {
        let links = vec!["https://doi.org/10.9999/direct".to_string()];
        let citation = Citation::new(Some("Paper, DOI: 10.1000/text"), &links);
        let resolution = Resolver::default().resolve(&citation);
        assert_eq!(resolution.kind, LinkKind::DirectDoi);
        assert_eq!(resolution.url, "https://doi.org/10.9999/direct");
    }

    #[test]
    fn test_missing_text_goes_to_profile() {
        let links = vec!["https://doi.org/10.9999/direct".to_string()];
        let resolution = Resolver::default().resolve(&Citation::new(None, &links));
        assert_eq!(resolution.kind, LinkKind::ScholarProfile);
        assert_eq!(resolution.url, DEFAULT_PROFILE_URL);
    }

    #[test]
    fn test_short_text_goes_to_profile() {
        let resolution = Resolver::default().resolve_text("Note");
        assert_eq!(resolution.kind, LinkKind::ScholarProfile);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = ResolverConfig::from_json(r#"{"author_query": "Jane Doe"}"#).unwrap();
        assert_eq!(config.author_query, "Jane Doe");
        assert_eq!(config.profile_url, DEFAULT_PROFILE_URL);
    }
}
