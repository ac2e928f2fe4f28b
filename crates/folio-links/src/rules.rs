//! Link classification rules
//!
//! Each rule inspects one citation and either produces a URL or declines.
//! Rules are pure and independent; the [`Resolver`](crate::Resolver) composes
//! them first-match-wins.

use std::sync::Arc;

use folio_domain::{LinkKind, PublicationEntry};

use crate::doi::{doi_url, find_doi, is_doi_link};
use crate::journal::{extract_journal_name, journal_domain, JournalDomain};
use crate::title::TitleExtractor;

/// Search endpoint used for journal-scoped searches
pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search?q=";
/// ResearchGate publication search endpoint
pub const RESEARCHGATE_SEARCH_URL: &str = "https://www.researchgate.net/search/publication?q=";
/// Academia.edu search endpoint
pub const ACADEMIA_SEARCH_URL: &str = "https://www.academia.edu/search?q=";

/// What the rules see of one publication
#[derive(Debug, Clone, Copy)]
pub struct Citation<'a> {
    /// The citation text block, if the entry has one
    pub text: Option<&'a str>,
    /// Hyperlink targets inside the entry
    pub links: &'a [String],
}

impl<'a> Citation<'a> {
    pub fn new(text: Option<&'a str>, links: &'a [String]) -> Self {
        Self { text, links }
    }

    /// A citation with text and no hyperlinks
    pub fn from_text(text: &'a str) -> Self {
        Self {
            text: Some(text),
            links: &[],
        }
    }

    pub fn from_entry(entry: &'a PublicationEntry) -> Self {
        Self {
            text: entry.citation.as_deref(),
            links: &entry.links,
        }
    }
}

/// One classification rule: pattern, extractor, and URL builder
pub trait LinkRule: Send + Sync {
    /// The classification this rule produces
    fn kind(&self) -> LinkKind;

    /// The URL for this citation, or `None` to fall through to the next rule.
    /// `text` is the citation text; rules never run without one.
    fn apply(&self, text: &str, links: &[String]) -> Option<String>;
}

/// Build a search URL from an endpoint and a raw query
pub fn search_url(endpoint: &str, query: &str) -> String {
    format!("{}{}", endpoint, urlencoding::encode(query))
}

/// An existing `doi.org` hyperlink, used verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDoiRule;

impl LinkRule for DirectDoiRule {
    fn kind(&self) -> LinkKind {
        LinkKind::DirectDoi
    }

    fn apply(&self, _text: &str, links: &[String]) -> Option<String> {
        links.iter().find(|href| is_doi_link(href)).cloned()
    }
}

/// A DOI written in the citation text
#[derive(Debug, Clone, Copy, Default)]
pub struct DoiTextRule;

impl LinkRule for DoiTextRule {
    fn kind(&self) -> LinkKind {
        LinkKind::Doi
    }

    fn apply(&self, text: &str, _links: &[String]) -> Option<String> {
        find_doi(text).map(|doi| doi_url(&doi))
    }
}

/// A title search restricted to the journal's website
#[derive(Debug, Clone)]
pub struct JournalSearchRule {
    titles: Arc<TitleExtractor>,
    domains: Vec<JournalDomain>,
    default_domain: String,
}

impl JournalSearchRule {
    pub fn new(titles: Arc<TitleExtractor>, domains: Vec<JournalDomain>, default_domain: String) -> Self {
        Self {
            titles,
            domains,
            default_domain,
        }
    }
}

impl LinkRule for JournalSearchRule {
    fn kind(&self) -> LinkKind {
        LinkKind::JournalSearch
    }

    fn apply(&self, text: &str, _links: &[String]) -> Option<String> {
        let journal = extract_journal_name(text)?;
        if journal.chars().count() <= 5 {
            return None;
        }
        let title = self.titles.extract(text);
        if title.is_empty() {
            return None;
        }
        let domain = journal_domain(&journal, &self.domains, &self.default_domain);
        Some(search_url(
            GOOGLE_SEARCH_URL,
            &format!("\"{}\" site:{}", title, domain),
        ))
    }
}

/// A title search on an academic network, for titles longer than a minimum
#[derive(Debug, Clone)]
pub struct TitleSearchRule {
    kind: LinkKind,
    endpoint: &'static str,
    min_title_chars: usize,
    titles: Arc<TitleExtractor>,
    author_query: String,
}

impl TitleSearchRule {
    /// ResearchGate search for titles longer than 10 characters
    pub fn research_gate(titles: Arc<TitleExtractor>, author_query: String) -> Self {
        Self {
            kind: LinkKind::ResearchGate,
            endpoint: RESEARCHGATE_SEARCH_URL,
            min_title_chars: 10,
            titles,
            author_query,
        }
    }

    /// Academia.edu search for titles longer than 5 characters
    pub fn academia(titles: Arc<TitleExtractor>, author_query: String) -> Self {
        Self {
            kind: LinkKind::Academia,
            endpoint: ACADEMIA_SEARCH_URL,
            min_title_chars: 5,
            titles,
            author_query,
        }
    }
}

impl LinkRule for TitleSearchRule {
    fn kind(&self) -> LinkKind {
        self.kind
    }

    fn apply(&self, text: &str, _links: &[String]) -> Option<String> {
        let title = self.titles.extract(text);
        if title.chars().count() <= self.min_title_chars {
            return None;
        }
        let query = if self.author_query.is_empty() {
            format!("\"{}\"", title)
        } else {
            format!("\"{}\" {}", title, self.author_query)
        };
        Some(search_url(self.endpoint, &query))
    }
}

/// The author's profile page; matches everything
#[derive(Debug, Clone)]
pub struct ProfileRule {
    url: String,
}

impl ProfileRule {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LinkRule for ProfileRule {
    fn kind(&self) -> LinkKind {
        LinkKind::ScholarProfile
    }

    fn apply(&self, _text: &str, _links: &[String]) -> Option<String> {
        Some(self.url.clone())
    }
}
