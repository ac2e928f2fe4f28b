//! Publication list entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication type (`data-type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    Journal,
    Conference,
    Book,
    #[default]
    Other,
}

impl PublicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationType::Journal => "journal",
            PublicationType::Conference => "conference",
            PublicationType::Book => "book",
            PublicationType::Other => "other",
        }
    }

    /// Parse a `data-type` attribute; anything unrecognized is `Other`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "journal" => PublicationType::Journal,
            "conference" => PublicationType::Conference,
            "book" => PublicationType::Book,
            _ => PublicationType::Other,
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the publication list, as read from markup.
///
/// Entries are never created or destroyed by the list controller; only their
/// visibility and ordering change.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PublicationEntry {
    /// `data-year`; absent years are treated as 0
    pub year: Option<i32>,
    pub kind: PublicationType,
    /// Full citation text, if the entry has a citation block
    pub citation: Option<String>,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub abstract_text: String,
    /// Targets of hyperlinks inside the entry
    pub links: Vec<String>,
}

impl PublicationEntry {
    /// Create an entry with a year, type and title
    pub fn new(year: Option<i32>, kind: PublicationType, title: impl Into<String>) -> Self {
        Self {
            year,
            kind,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder method to add citation text
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Builder method to add authors
    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    /// Builder method to add the journal line
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    /// Builder method to add an abstract
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    /// Builder method to add a hyperlink target
    pub fn with_link(mut self, href: impl Into<String>) -> Self {
        self.links.push(href.into());
        self
    }

    /// Year used for comparisons and sorting
    pub fn year_value(&self) -> i32 {
        self.year.unwrap_or(0)
    }

    /// Case-insensitive substring match against title, authors, journal and
    /// abstract. `term` must already be lowercase; an empty term matches.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        [
            &self.title,
            &self.authors,
            &self.journal,
            &self.abstract_text,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
    }
}

/// Aggregate counts by publication type
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicationStats {
    pub total: usize,
    pub journal: usize,
    pub conference: usize,
    pub book: usize,
}

impl PublicationStats {
    pub fn from_entries(entries: &[PublicationEntry]) -> Self {
        let count = |kind: PublicationType| entries.iter().filter(|e| e.kind == kind).count();
        Self {
            total: entries.len(),
            journal: count(PublicationType::Journal),
            conference: count(PublicationType::Conference),
            book: count(PublicationType::Book),
        }
    }
}

/// Label for the results counter
pub fn results_count_label(count: usize) -> String {
    if count == 0 {
        "No publications found".to_string()
    } else {
        format!(
            "Showing {} publication{}",
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}
