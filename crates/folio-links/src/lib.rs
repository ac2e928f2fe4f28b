//! Publication link resolution for free-text citations
//!
//! This crate turns one citation string into the single best external link:
//! - DOI detection (existing `doi.org` hyperlinks and six textual forms)
//! - Journal name extraction and journal-domain lookup
//! - Title extraction and normalization
//! - Search fallbacks (ResearchGate, Academia.edu, Google Scholar profile)
//! - Citation year inference
//!
//! Resolution is an ordered list of pure [`LinkRule`]s composed first-match-wins.
//! It is total: every input yields a [`LinkResolution`].

pub mod doi;
pub mod journal;
pub mod resolver;
pub mod rules;
pub mod title;
pub mod year;

pub use doi::*;
pub use journal::*;
pub use resolver::*;
pub use rules::*;
pub use title::*;
pub use year::*;

pub use folio_domain::{LinkKind, LinkResolution};
