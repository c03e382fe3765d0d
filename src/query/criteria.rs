//! Filter criteria selected by the user.
//!
//! Every field is optional. An absent or empty criterion never constrains the
//! result; it does not mean "match nothing". Bounds are inclusive, and a range
//! whose minimum exceeds its maximum is accepted and simply matches nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive `[min, max]` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// `min <= value <= max`. Always false when `min > max`.
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }
}

/// Inclusive timestamp bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *date >= from) && self.to.map_or(true, |to| *date <= to)
    }
}

/// The combined filter configuration applied to a collection of entries.
///
/// # Examples
///
/// ```
/// use jotter::query::FilterCriteria;
///
/// let criteria = FilterCriteria::default()
///     .with_tag("health")
///     .with_search("calm")
///     .with_word_count(10, 500);
/// assert!(!criteria.is_unconstrained());
/// assert!(FilterCriteria::default().is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub date_range: Option<DateRange>,
    /// Entries must carry every selected tag.
    pub selected_tags: BTreeSet<String>,
    /// Bounds on the mapped 0–100 sentiment score.
    pub sentiment_range: Option<Bounds<u8>>,
    pub word_count_range: Option<Bounds<usize>>,
    pub search_query: Option<String>,
    pub has_media: bool,
    pub has_code: bool,
}

impl FilterCriteria {
    pub fn with_date_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_range = Some(DateRange::new(from, to));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.insert(tag.into());
        self
    }

    pub fn with_sentiment(mut self, min: u8, max: u8) -> Self {
        self.sentiment_range = Some(Bounds::new(min, max));
        self
    }

    pub fn with_word_count(mut self, min: usize, max: usize) -> Self {
        self.word_count_range = Some(Bounds::new(min, max));
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_media(mut self) -> Self {
        self.has_media = true;
        self
    }

    pub fn with_code(mut self) -> Self {
        self.has_code = true;
        self
    }

    /// The search query lowercased, or `None` when absent or blank.
    pub(crate) fn normalized_search(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no criterion would exclude any entry.
    pub fn is_unconstrained(&self) -> bool {
        self.date_range
            .map_or(true, |range| range.from.is_none() && range.to.is_none())
            && self.selected_tags.is_empty()
            && self.sentiment_range.is_none()
            && self.word_count_range.is_none()
            && self.normalized_search().is_none()
            && !self.has_media
            && !self.has_code
    }
}
