//! Publication list: search, year/type filters, sorting, and link activation
//!
//! Visibility is re-derived from the entries and the four filter inputs on
//! every change. An entry is visible exactly when it satisfies
//! `year ∧ type ∧ search`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use folio_domain::{
    results_count_label, LinkResolution, PublicationEntry, PublicationStats, PublicationType,
};
use folio_links::Resolver;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::{PublicationsConfig, TimingConfig};
use crate::error::FilterError;
use crate::event::{FilterControl, Key};
use crate::page::{ElementId, PageSnapshot};
use crate::scheduler::{Debouncer, Scheduler, TimerHandle};

pub trait PublicationView {
    fn set_entry_visible(&mut self, entry: usize, visible: bool);
    /// Replace the children of a year section with `entries`, in order
    fn arrange_section(&mut self, year: i32, entries: &[usize]);
    /// Results label; `no_results` toggles the empty-state block
    fn set_results_count(&mut self, label: &str, no_results: bool);
    fn set_publication_stats(&mut self, stats: &PublicationStats);
    /// Write filter values back into the search box and selects
    fn set_filter_controls(&mut self, filters: &FilterState);
    /// Mark an entry clickable: `tabindex=0`, `role=button`, the link's
    /// aria label, and its tooltip as the `--tooltip-text` property
    fn decorate_entry(&mut self, entry: usize, link: &LinkResolution);
}

/// Year select value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    Any,
    Year(i32),
    /// Anything before the configured threshold, including unknown years
    Older,
}

impl YearFilter {
    pub fn matches(&self, entry: &PublicationEntry, older_than: i32) -> bool {
        match self {
            YearFilter::Any => true,
            YearFilter::Year(year) => entry.year == Some(*year),
            YearFilter::Older => entry.year_value() < older_than,
        }
    }
}

impl FromStr for YearFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(YearFilter::Any),
            "older" => Ok(YearFilter::Older),
            value => value
                .parse()
                .map(YearFilter::Year)
                .map_err(|_| FilterError::InvalidYear(value.to_string())),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::Any => Ok(()),
            YearFilter::Year(year) => write!(f, "{}", year),
            YearFilter::Older => f.write_str("older"),
        }
    }
}

/// Sort select value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    YearDesc,
    YearAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::YearDesc => "year-desc",
            SortOrder::YearAsc => "year-asc",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
        }
    }

    pub fn compare(&self, a: &PublicationEntry, b: &PublicationEntry) -> Ordering {
        match self {
            SortOrder::YearDesc => b.year_value().cmp(&a.year_value()),
            SortOrder::YearAsc => a.year_value().cmp(&b.year_value()),
            SortOrder::TitleAsc => locale_compare(&a.title, &b.title),
            SortOrder::TitleDesc => locale_compare(&b.title, &a.title),
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "year-desc" => Ok(SortOrder::YearDesc),
            "year-asc" => Ok(SortOrder::YearAsc),
            "title-asc" => Ok(SortOrder::TitleAsc),
            "title-desc" => Ok(SortOrder::TitleDesc),
            other => Err(FilterError::UnknownSort(other.to_string())),
        }
    }
}

/// Accent- and case-insensitive ordering, with the raw strings as tiebreak
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The four filter inputs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Search box text as typed
    pub search: String,
    pub year: YearFilter,
    pub kind: Option<PublicationType>,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn matches(&self, entry: &PublicationEntry, older_than: i32) -> bool {
        self.year.matches(entry, older_than)
            && self.kind.map_or(true, |kind| entry.kind == kind)
            && entry.matches_search(&self.search.to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct PublicationList {
    entries: Vec<PublicationEntry>,
    links: Vec<LinkResolution>,
    visible: Vec<bool>,
    sections: Vec<i32>,
    filters: FilterState,
    search: Debouncer,
    older_than: i32,
    has_results_count: bool,
    can_sort: bool,
}

impl PublicationList {
    /// Needs the publication list. Writes the statistics and resolves and
    /// decorates every entry's link.
    pub fn attach<V: PublicationView>(
        page: &PageSnapshot,
        config: &PublicationsConfig,
        timing: &TimingConfig,
        resolver: &Resolver,
        view: &mut V,
    ) -> Option<Self> {
        if !page.has(ElementId::PublicationsList) {
            return None;
        }

        let entries = page.publications.clone();
        view.set_publication_stats(&PublicationStats::from_entries(&entries));

        let links: Vec<LinkResolution> = entries.iter().map(|e| resolver.resolve_entry(e)).collect();
        for (index, link) in links.iter().enumerate() {
            view.decorate_entry(index, link);
        }
        tracing::debug!(entries = entries.len(), "publication list ready");

        Some(Self {
            visible: vec![true; entries.len()],
            entries,
            links,
            sections: page.year_sections.clone(),
            filters: FilterState::default(),
            search: Debouncer::new(timing.search_debounce()),
            older_than: config.older_than,
            has_results_count: page.has(ElementId::ResultsCount),
            can_sort: page.has(ElementId::PublicationsContainer),
        })
    }

    pub fn entries(&self) -> &[PublicationEntry] {
        &self.entries
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_visible(&self, entry: usize) -> bool {
        self.visible.get(entry).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn link(&self, entry: usize) -> Option<&LinkResolution> {
        self.links.get(entry)
    }

    /// Record search text; filtering runs once typing pauses
    pub fn on_search_input<S: Scheduler>(&mut self, text: &str, scheduler: &mut S) {
        self.filters.search = text.to_string();
        self.search.trigger(scheduler);
    }

    /// Search button: filter immediately
    pub fn search_now<H>(&mut self, host: &mut H) -> usize
    where
        H: PublicationView + Scheduler,
    {
        self.search.cancel(host);
        self.apply(host)
    }

    /// A filter select changed. Invalid values are logged and treated as the
    /// control's default.
    pub fn on_filter_changed<V: PublicationView>(&mut self, control: FilterControl, value: &str, view: &mut V) -> usize {
        match control {
            FilterControl::Year => {
                self.filters.year = value.parse().unwrap_or_else(|e: FilterError| {
                    tracing::warn!(error = %e, "ignoring year filter");
                    YearFilter::Any
                });
            }
            FilterControl::Type => {
                self.filters.kind = match value.trim() {
                    "" => None,
                    kind => Some(PublicationType::parse(kind)),
                };
            }
            FilterControl::Sort => {
                self.filters.sort = value.parse().unwrap_or_else(|e: FilterError| {
                    tracing::warn!(error = %e, "ignoring sort order");
                    SortOrder::default()
                });
            }
        }
        self.apply(view)
    }

    /// Re-derive visibility and order from the filters. Returns the visible
    /// count.
    pub fn apply<V: PublicationView>(&mut self, view: &mut V) -> usize {
        for (index, entry) in self.entries.iter().enumerate() {
            let visible = self.filters.matches(entry, self.older_than);
            self.visible[index] = visible;
            view.set_entry_visible(index, visible);
        }

        if self.can_sort {
            self.arrange_sections(view);
        }

        let count = self.visible_count();
        self.update_results(count, view);
        tracing::debug!(count, "publications filtered");
        count
    }

    /// Order of each year section's entries under the current sort: visible
    /// entries sorted, then hidden ones in document order
    pub fn section_order(&self, year: i32) -> Vec<usize> {
        let mut sorted: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.visible[i] && self.entries[i].year == Some(year))
            .collect();
        sorted.sort_by(|&a, &b| self.filters.sort.compare(&self.entries[a], &self.entries[b]));
        sorted.extend(
            (0..self.entries.len()).filter(|&i| !self.visible[i] && self.entries[i].year == Some(year)),
        );
        sorted
    }

    /// Reset every filter and show all entries
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: PublicationView + Scheduler,
    {
        self.search.cancel(host);
        self.filters = FilterState::default();
        host.set_filter_controls(&self.filters);
        for (index, visible) in self.visible.iter_mut().enumerate() {
            *visible = true;
            host.set_entry_visible(index, true);
        }
        self.update_results(self.entries.len(), host);
    }

    /// Returns whether the timer belonged to the list
    pub fn on_timer<V: PublicationView>(&mut self, handle: TimerHandle, view: &mut V) -> bool {
        if self.search.fire(handle) {
            self.apply(view);
            true
        } else {
            false
        }
    }

    /// URL opened when an entry is clicked
    pub fn activate(&self, entry: usize) -> Option<&str> {
        self.links.get(entry).map(|link| link.url.as_str())
    }

    /// Enter and Space activate a focused entry
    pub fn handle_key(&self, entry: usize, key: Key) -> Option<&str> {
        match key {
            Key::Enter | Key::Space => self.activate(entry),
            _ => None,
        }
    }

    pub fn teardown<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.search.cancel(scheduler);
    }

    fn arrange_sections<V: PublicationView>(&self, view: &mut V) {
        for &year in &self.sections {
            view.arrange_section(year, &self.section_order(year));
        }
    }

    fn update_results<V: PublicationView>(&self, count: usize, view: &mut V) {
        if self.has_results_count {
            view.set_results_count(&results_count_label(count), count == 0);
        }
    }
}
