//! In-memory entry query engine.
//!
//! Filters, searches and sorts a collection of journal entries. The engine is
//! a pure, synchronous transformation: it never mutates its input, holds no
//! state between calls and never fails. Contradictory criteria (for example a
//! range with `min > max`) produce an empty result rather than an error.
//!
//! Each call re-runs the full pipeline over the whole collection in
//! O(n log n), which is fine for a single user's journal.

pub mod criteria;
pub mod sort;

pub use criteria::{Bounds, DateRange, FilterCriteria};
pub use sort::{SortKey, SortOrder, SortSpec};

use crate::entry::Entry;
use std::collections::BTreeMap;
use tracing::debug;

/// Returns the entries matching `criteria`, ordered by `sort`.
///
/// The filter predicates are ANDed. Sorting is stable, so entries with equal
/// keys keep their relative input order in both directions.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use jotter::entry::Entry;
/// use jotter::query::{query, FilterCriteria, SortKey, SortSpec};
///
/// let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
/// let entries = vec![
///     Entry::new("Run", "<p>5k</p>", day(3)).with_tags(["health"]),
///     Entry::new("Read", "<p>novel</p>", day(1)),
///     Entry::new("Swim", "<p>laps</p>", day(2)).with_tags(["health"]),
/// ];
///
/// let criteria = FilterCriteria::default().with_tag("health");
/// let result = query(&entries, &criteria, SortSpec::ascending(SortKey::Date));
/// let titles: Vec<&str> = result.iter().map(|e| e.title.as_str()).collect();
/// assert_eq!(titles, ["Swim", "Run"]);
/// ```
pub fn query<'a>(
    entries: &'a [Entry],
    criteria: &FilterCriteria,
    sort: SortSpec,
) -> Vec<&'a Entry> {
    let search = criteria.normalized_search();
    let mut visible: Vec<&Entry> = entries
        .iter()
        .filter(|entry| matches_with(entry, criteria, search.as_deref()))
        .collect();

    // `sort_by` is stable.
    visible.sort_by(|a, b| sort.compare(a, b));

    debug!(
        "Query matched {} of {} entries (sort: {} {:?})",
        visible.len(),
        entries.len(),
        sort.key,
        sort.order
    );
    visible
}

/// Whether a single entry satisfies every active criterion.
pub fn matches(entry: &Entry, criteria: &FilterCriteria) -> bool {
    matches_with(entry, criteria, criteria.normalized_search().as_deref())
}

fn matches_with(entry: &Entry, criteria: &FilterCriteria, search: Option<&str>) -> bool {
    if let Some(range) = &criteria.date_range {
        if !range.contains(&entry.date) {
            return false;
        }
    }

    if !criteria.selected_tags.is_subset(&entry.tags) {
        return false;
    }

    if let Some(range) = &criteria.sentiment_range {
        if !range.contains(&entry.sentiment.score()) {
            return false;
        }
    }

    if let Some(range) = &criteria.word_count_range {
        if !range.contains(&entry.word_count()) {
            return false;
        }
    }

    if let Some(needle) = search {
        if !matches_search(entry, needle) {
            return false;
        }
    }

    if criteria.has_media && !entry.has_media() {
        return false;
    }

    if criteria.has_code && !entry.has_code() {
        return false;
    }

    true
}

/// `needle` must already be lowercased and non-empty.
fn matches_search(entry: &Entry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.plain_text().to_lowercase().contains(needle)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Every distinct tag in `entries` with the number of entries carrying it,
/// ordered by tag name. Feeds tag pickers in filter UIs.
pub fn tag_catalog(entries: &[Entry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in entries.iter().flat_map(|entry| entry.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect()
}
