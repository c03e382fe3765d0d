/*!
# Jotter

Jotter is the core of a personal journaling application: it filters, searches and
sorts journal entries in memory, derives insights from them, and tracks the
lifecycle of asynchronous actions such as saving an entry.

## Core Features

- Query entries by date range, tags (all must match), sentiment score, word count,
  free-text search, and media/code content
- Stable sorting by date, title or sentiment label
- Insights: tag cloud, mood trend, sentiment breakdown, writing statistics
- A generic operation manager tracking idle/pending/succeeded/failed for any
  async action, with observers, timeouts and auto-start

## Architecture

- `entry`: The journal entry record and markup heuristics
- `query`: Filter criteria, sort specification and the query engine
- `lifecycle`: Asynchronous operation lifecycle manager
- `insights`: Analytics over a set of entries
- `snapshot`: Reading entry snapshots from JSON
- `cli`, `config`, `logging`, `errors`: Application plumbing

## Usage Example

```rust
use chrono::{TimeZone, Utc};
use jotter::entry::Entry;
use jotter::query::{query, FilterCriteria, SortKey, SortSpec};

let entries = vec![
    Entry::new("Morning Walk", "<p>Felt calm</p>", Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap())
        .with_tags(["health"]),
    Entry::new("Standup", "<p>Sprint planning</p>", Utc.with_ymd_and_hms(2024, 1, 16, 9, 0, 0).unwrap())
        .with_tags(["work"]),
];

let criteria = FilterCriteria::default().with_search("calm");
let visible = query(&entries, &criteria, SortSpec::ascending(SortKey::Title));
assert_eq!(visible.len(), 1);
assert_eq!(visible[0].title, "Morning Walk");
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// The journal entry record
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Analytics derived from entries
pub mod insights;
/// Asynchronous operation lifecycle manager
pub mod lifecycle;
/// Tracing subscriber setup
pub mod logging;
/// In-memory query engine
pub mod query;
/// Entry snapshot loading
pub mod snapshot;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use entry::{Entry, Sentiment};
pub use errors::{ActionError, AppError, AppResult};
pub use lifecycle::{Operation, OperationState, OperationStatus};
pub use query::{query, FilterCriteria, SortKey, SortOrder, SortSpec};
