//! Derived insights over a set of journal entries.
//!
//! Summaries are computed from whatever slice the caller passes in, usually the
//! output of [`crate::query::query`], so filters narrow the insights too:
//! - Tag cloud (how often each tag appears)
//! - Sentiment breakdown and a per-day mood trend
//! - Writing statistics (word totals, weekday distribution, longest gap)

use crate::entry::Entry;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// A tag and the number of entries carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWeight {
    pub tag: String,
    pub count: usize,
}

/// Average sentiment score of the entries written on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPoint {
    pub day: NaiveDate,
    pub average_score: f64,
    pub entries: usize,
}

/// Summary of a set of entries.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Insights {
    pub total_entries: usize,
    pub total_words: usize,
    pub average_words: f64,
    /// Most frequent first; ties ordered by tag name.
    pub tag_cloud: Vec<TagWeight>,
    /// Entry count per lowercase sentiment label.
    pub sentiment_breakdown: BTreeMap<String, usize>,
    /// One point per calendar day (UTC), oldest first.
    pub mood_trend: Vec<MoodPoint>,
    #[serde(serialize_with = "serialize_weekdays")]
    pub day_distribution: HashMap<Weekday, usize>,
    /// Largest number of days between consecutive days with entries.
    pub longest_gap_days: i64,
}

/// Computes insights for `entries`. Empty input yields zeroed insights.
pub fn summarize(entries: &[&Entry]) -> Insights {
    if entries.is_empty() {
        debug!("No entries to summarize");
        return Insights::default();
    }

    let total_entries = entries.len();
    let total_words: usize = entries.iter().map(|entry| entry.word_count()).sum();

    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    let mut sentiment_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut day_distribution: HashMap<Weekday, usize> = HashMap::new();
    let mut scores_by_day: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();

    for entry in entries {
        for tag in &entry.tags {
            *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
        }
        *sentiment_breakdown
            .entry(entry.sentiment.label().trim().to_lowercase())
            .or_insert(0) += 1;

        let day = entry.date.date_naive();
        *day_distribution.entry(day.weekday()).or_insert(0) += 1;

        let slot = scores_by_day.entry(day).or_insert((0, 0));
        slot.0 += u32::from(entry.sentiment.score());
        slot.1 += 1;
    }

    let mut tag_cloud: Vec<TagWeight> = tag_counts
        .into_iter()
        .map(|(tag, count)| TagWeight {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tag_cloud.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    let longest_gap_days = scores_by_day
        .keys()
        .collect::<Vec<_>>()
        .windows(2)
        .map(|pair| pair[1].signed_duration_since(*pair[0]).num_days())
        .max()
        .unwrap_or(0);

    let mood_trend = scores_by_day
        .into_iter()
        .map(|(day, (score_sum, count))| MoodPoint {
            day,
            average_score: f64::from(score_sum) / count as f64,
            entries: count,
        })
        .collect();

    debug!(
        "Summarized {} entries ({} words, {} tags)",
        total_entries,
        total_words,
        tag_cloud.len()
    );

    Insights {
        total_entries,
        total_words,
        average_words: total_words as f64 / total_entries as f64,
        tag_cloud,
        sentiment_breakdown,
        mood_trend,
        day_distribution,
        longest_gap_days,
    }
}

fn serialize_weekdays<S>(days: &HashMap<Weekday, usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let ordered: BTreeMap<u32, (String, usize)> = days
        .iter()
        .map(|(day, count)| (day.num_days_from_monday(), (day.to_string(), *count)))
        .collect();
    serializer.collect_map(ordered.into_values())
}
