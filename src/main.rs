/*!
# Jotter - Query and Summarize Journal Entries

Reads an entry snapshot, applies filter flags and prints either the matching
entries or insights derived from them.

## Usage

```text
jotter [OPTIONS] <COMMAND>

Commands:
  list      List entries matching the filters
  insights  Summarize entries matching the filters

Options:
  -e, --entries <ENTRIES>        Entry snapshot to read (overrides JOTTER_ENTRIES)
      --log-format <LOG_FORMAT>  Log output format: text or json
  -v, --verbose                  Print verbose output
```

## Configuration

- `JOTTER_ENTRIES`: Snapshot path (defaults to "~/Documents/jotter/entries.json")
- `JOTTER_LOG_FORMAT`: `text` or `json`
- `JOTTER_ACTION_TIMEOUT_MS`: Timeout for loading the snapshot
- `RUST_LOG`: Overrides the log level
*/

use clap::Parser;
use jotter::cli::{self, CliArgs, Command};
use jotter::config::Config;
use jotter::constants::{TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use jotter::entry::Entry;
use jotter::errors::{AppError, AppResult};
use jotter::insights;
use jotter::lifecycle::{Operation, OperationEvent};
use jotter::query::{query, SortSpec};
use jotter::snapshot;
use std::path::PathBuf;
use tracing::{debug, info, info_span, Instrument};

/// Applies command-line overrides on top of the environment configuration.
fn resolve_config(args: &CliArgs) -> AppResult<Config> {
    let mut config = Config::load()?;

    if let Some(path) = &args.entries {
        config.entries_path = if path.is_absolute() {
            path.clone()
        } else {
            std::env::current_dir()?.join(path)
        };
    }

    if let Some(format) = args.log_format {
        config.log_format = format;
    }

    config.validate()?;
    Ok(config)
}

async fn load_entries(config: &Config) -> AppResult<Vec<Entry>> {
    let loader = Operation::builder(|path: PathBuf| async move {
        snapshot::load_snapshot(&path).await
    })
    .name("load-entries")
    .timeout(config.action_timeout)
    .observe(|event: &OperationEvent<'_, Vec<Entry>>| {
        if let OperationEvent::Succeeded(entries) = event {
            info!("Loaded {} entries", entries.len());
        }
    })
    .build()?;

    let entries = loader.invoke(config.entries_path.clone()).await?;
    Ok(entries)
}

async fn run(args: CliArgs, config: Config) -> AppResult<()> {
    debug!("Configuration: {:?}", config);
    let entries = load_entries(&config).await?;

    match args.command {
        Command::List(list) => {
            let criteria = list.filter.to_criteria()?;
            let visible = query(&entries, &criteria, list.sort_spec());
            if list.json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print!("{}", cli::render_entries(&visible));
            }
        }
        Command::Insights(summary) => {
            let criteria = summary.filter.to_criteria()?;
            let visible = query(&entries, &criteria, SortSpec::default());
            let insights = insights::summarize(&visible);
            if summary.json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else {
                print!("{}", cli::render_insights(&insights));
            }
        }
    }

    Ok(())
}

/// The main entry point for the jotter application.
///
/// 1. Parses command-line arguments
/// 2. Loads and validates configuration
/// 3. Initializes structured logging
/// 4. Loads the entry snapshot through the operation manager
/// 5. Runs the requested command
///
/// # Errors
///
/// Returns configuration, I/O, JSON, argument or action errors.
#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    let config = resolve_config(&args)?;
    jotter::logging::init(config.log_format, args.verbose)?;

    let invocation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        invocation_id = %invocation_id
    );

    let result = run(args, config).instrument(span).await;
    if let Err(AppError::Action(error)) = &result {
        debug!("Action failure cause: {:?}", error.cause());
    }
    result
}
