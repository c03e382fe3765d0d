//! Sort specification and entry comparators.

use crate::entry::Entry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The single active sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Title,
    /// Orders by sentiment label text, not by its numeric score.
    Sentiment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Which key to sort by and in which direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    /// Compares two entries under this spec.
    ///
    /// Descending order reverses the comparator result, so entries with equal
    /// keys compare `Equal` in both directions and a stable sort keeps them in
    /// input order.
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Title => collate(&a.title, &b.title),
            SortKey::Sentiment => a.sentiment.label().cmp(b.sentiment.label()),
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Locale-style multi-level string comparison.
///
/// Levels, each consulted only when the previous one ties:
/// 1. base letters: decomposed, accents dropped, case-folded
/// 2. accents: unaccented before accented
/// 3. case: lowercase before uppercase
/// 4. raw string, so the ordering stays total
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Lowercase wins at the first position where the case differs.
fn case_order(a: &str, b: &str) -> Ordering {
    a.nfd()
        .zip(b.nfd())
        .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "sentiment" => Ok(SortKey::Sentiment),
            other => Err(format!(
                "unknown sort key '{}': expected date, title or sentiment",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Sentiment => "sentiment",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}': expected asc or desc", other)),
        }
    }
}
