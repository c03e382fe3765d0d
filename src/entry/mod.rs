//! The journal entry record consumed by the query engine.
//!
//! Entries are created by an external flow and are read-only here: nothing in
//! this crate mutates or destroys them.

pub mod markup;

use crate::constants::{
    SENTIMENT_SCORE_NEGATIVE, SENTIMENT_SCORE_NEUTRAL, SENTIMENT_SCORE_POSITIVE,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// An opaque, pre-computed sentiment label such as `positive` or `neutral`.
///
/// Labels order lexicographically. For range filtering they map onto a fixed
/// 0–100 score via [`Sentiment::score`].
///
/// # Examples
///
/// ```
/// use jotter::entry::Sentiment;
///
/// assert_eq!(Sentiment::new("Positive").score(), 100);
/// assert_eq!(Sentiment::new("negative").score(), 0);
/// assert_eq!(Sentiment::new("wistful").score(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentiment(String);

impl Sentiment {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// Numeric score on the 0–100 scale. Unknown labels score as neutral.
    pub fn score(&self) -> u8 {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "positive" => SENTIMENT_SCORE_POSITIVE,
            "negative" => SENTIMENT_SCORE_NEGATIVE,
            _ => SENTIMENT_SCORE_NEUTRAL,
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::new("neutral")
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sentiment {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A single journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub sentiment: Sentiment,
    /// Stored word count. When absent it is derived from the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl Entry {
    /// Creates an entry with a fresh id, no tags and a neutral sentiment.
    pub fn new(title: impl Into<String>, content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            tags: BTreeSet::new(),
            date,
            sentiment: Sentiment::default(),
            word_count: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<Sentiment>) -> Self {
        self.sentiment = sentiment.into();
        self
    }

    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = Some(word_count);
        self
    }

    /// Stored word count, or the count of words in the plain-text content.
    pub fn word_count(&self) -> usize {
        self.word_count
            .unwrap_or_else(|| markup::count_words(&self.content))
    }

    /// Content with markup removed.
    pub fn plain_text(&self) -> String {
        markup::strip_markup(&self.content)
    }

    pub fn has_media(&self) -> bool {
        markup::has_media(&self.content)
    }

    pub fn has_code(&self) -> bool {
        markup::has_code(&self.content)
    }
}
