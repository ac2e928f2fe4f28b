//! Resolved external links for publication entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a publication link was obtained, in resolver priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// An existing `doi.org` hyperlink inside the entry
    DirectDoi,
    /// A DOI found in the citation text
    Doi,
    /// A search scoped to the journal's website
    JournalSearch,
    /// A ResearchGate publication search
    ResearchGate,
    /// An Academia.edu search
    Academia,
    /// The author's Google Scholar profile
    ScholarProfile,
}

impl LinkKind {
    /// The classification label
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::DirectDoi => "Direct DOI Link",
            LinkKind::Doi => "DOI Link",
            LinkKind::JournalSearch => "Journal Search",
            LinkKind::ResearchGate => "ResearchGate Search",
            LinkKind::Academia => "Academia.edu Search",
            LinkKind::ScholarProfile => "Google Scholar Profile",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            LinkKind::DirectDoi | LinkKind::Doi => "🔗 View Full Paper",
            LinkKind::JournalSearch => "📄 Search Journal",
            LinkKind::ResearchGate => "🔬 Search ResearchGate",
            LinkKind::Academia => "🎓 Search Academia.edu",
            LinkKind::ScholarProfile => "👨‍🏫 View Scholar Profile",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value for the entry's `--tooltip-text` custom property (a quoted CSS string)
pub fn tooltip_css_value(tooltip: &str) -> String {
    format!("\"{}\"", tooltip)
}

/// The best external link for one publication
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResolution {
    pub url: String,
    pub kind: LinkKind,
}

impl LinkResolution {
    pub fn new(url: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn tooltip(&self) -> &'static str {
        self.kind.tooltip()
    }

    /// Accessible label for the clickable entry
    pub fn aria_label(&self) -> String {
        format!("Click to view publication via {}", self.kind.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_per_kind() {
        assert_eq!(LinkKind::DirectDoi.tooltip(), LinkKind::Doi.tooltip());
        assert_eq!(LinkKind::JournalSearch.tooltip(), "📄 Search Journal");
    }

    #[test]
    fn test_tooltip_css_value_is_quoted() {
        assert_eq!(tooltip_css_value("📄 Search Journal"), "\"📄 Search Journal\"");
    }

    #[test]
    fn test_aria_label() {
        let resolution = LinkResolution::new("https://doi.org/10.1/x", LinkKind::Doi);
        assert_eq!(resolution.aria_label(), "Click to view publication via DOI Link");
    }
}
