use crate::config::LogFormat;
use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, SENTIMENT_SCORE_MAX,
};
use crate::entry::Entry;
use crate::errors::{AppError, AppResult};
use crate::insights::Insights;
use crate::query::{FilterCriteria, SortKey, SortOrder, SortSpec};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for jotter
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Entry snapshot to read (overrides JOTTER_ENTRIES)
    #[arg(short = 'e', long, global = true)]
    pub entries: Option<PathBuf>,

    /// Log output format: text or json (overrides JOTTER_LOG_FORMAT)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries matching the filters
    List(ListArgs),
    /// Summarize entries matching the filters
    Insights(InsightsArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Sort key: date, title or sentiment
    #[arg(long, default_value = "date")]
    pub sort: SortKey,

    /// Sort order: asc or desc
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print insights as JSON
    #[arg(long)]
    pub json: bool,
}

/// Filter flags shared by every command.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Require a tag (repeatable; entries must carry every tag given)
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,

    /// Case-insensitive text to find in titles, content or tags
    #[arg(short = 's', long)]
    pub search: Option<String>,

    /// Earliest entry date, inclusive (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest entry date, inclusive (format: YYYY-MM-DD or YYYYMMDD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum word count
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Maximum word count
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Minimum sentiment score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_sentiment: Option<u8>,

    /// Maximum sentiment score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub max_sentiment: Option<u8>,

    /// Only entries containing images, embeds or links
    #[arg(long)]
    pub has_media: bool,

    /// Only entries containing code
    #[arg(long)]
    pub has_code: bool,
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD format.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str).or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}

fn start_of_day(date: NaiveDate) -> AppResult<DateTime<Utc>> {
    let first = NaiveTime::from_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Cli("Could not compute start of day".to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(first)))
}

fn end_of_day(date: NaiveDate) -> AppResult<DateTime<Utc>> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .ok_or_else(|| AppError::Cli("Could not compute end of day".to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(last)))
}

fn parse_bound(flag: &str, value: &str) -> AppResult<NaiveDate> {
    parse_date(value).map_err(|e| {
        AppError::Cli(format!(
            "Invalid date format for --{}: '{}' ({})",
            flag, value, e
        ))
    })
}

impl FilterArgs {
    /// Builds filter criteria from the flags.
    ///
    /// A one-sided range is open on the other side. `--to` covers the whole
    /// day it names.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cli` when a date cannot be parsed.
    pub fn to_criteria(&self) -> AppResult<FilterCriteria> {
        let mut criteria = FilterCriteria {
            selected_tags: self.tags.iter().cloned().collect(),
            search_query: self.search.clone(),
            has_media: self.has_media,
            has_code: self.has_code,
            ..FilterCriteria::default()
        };

        if self.from.is_some() || self.to.is_some() {
            let from = match &self.from {
                Some(value) => Some(start_of_day(parse_bound("from", value)?)?),
                None => None,
            };
            let to = match &self.to {
                Some(value) => Some(end_of_day(parse_bound("to", value)?)?),
                None => None,
            };
            criteria = criteria.with_date_range(from, to);
        }

        if self.min_words.is_some() || self.max_words.is_some() {
            criteria = criteria.with_word_count(
                self.min_words.unwrap_or(0),
                self.max_words.unwrap_or(usize::MAX),
            );
        }

        if self.min_sentiment.is_some() || self.max_sentiment.is_some() {
            criteria = criteria.with_sentiment(
                self.min_sentiment.unwrap_or(0),
                self.max_sentiment.unwrap_or(SENTIMENT_SCORE_MAX),
            );
        }

        Ok(criteria)
    }
}

impl ListArgs {
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort, self.order)
    }
}

/// One line per entry: date, title, tags, sentiment and word count.
pub fn render_entries(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "No matching entries\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let title = if entry.title.trim().is_empty() {
            "(untitled)"
        } else {
            entry.title.as_str()
        };
        let tags = entry.tags.iter().cloned().collect::<Vec<_>>().join(", ");
        let _ = writeln!(
            out,
            "{}  {}  [{}]  {}  {} words",
            entry.date.format(DATE_FORMAT_ISO),
            title,
            tags,
            entry.sentiment,
            entry.word_count()
        );
    }
    out
}

/// Human-readable insight summary.
pub fn render_insights(insights: &Insights) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Entries: {}", insights.total_entries);
    let _ = writeln!(
        out,
        "Words: {} (avg {:.1})",
        insights.total_words, insights.average_words
    );

    if !insights.tag_cloud.is_empty() {
        let tags: Vec<String> = insights
            .tag_cloud
            .iter()
            .map(|weight| format!("{} ({})", weight.tag, weight.count))
            .collect();
        let _ = writeln!(out, "Tags: {}", tags.join(", "));
    }

    if !insights.sentiment_breakdown.is_empty() {
        let moods: Vec<String> = insights
            .sentiment_breakdown
            .iter()
            .map(|(label, count)| format!("{} {}", label, count))
            .collect();
        let _ = writeln!(out, "Sentiment: {}", moods.join(", "));
    }

    for point in &insights.mood_trend {
        let _ = writeln!(
            out,
            "  {}  mood {:>5.1}  ({} entries)",
            point.day, point.average_score, point.entries
        );
    }

    let _ = writeln!(out, "Longest gap: {} days", insights.longest_gap_days);
    out
}
