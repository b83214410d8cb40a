//! tablekit command-line interface
//!
//! Filters a JSON array of rows with a table filter state and prints the rows
//! that pass.
//!
//! # Usage
//!
//! ```text
//! tablekit filter --rows rows.json --state state.json
//! tablekit filter --rows rows.json --search widget --format table
//! tablekit operators --variant date
//! ```

mod input;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tablekit_core::{FilterVariant, GlobalFilter, Row, TableFilterState};
use tablekit_filter::{FilterEngine, FilterSettings};

use crate::logging::LoggingConfig;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tablekit", version, about = "Evaluate table filters against JSON rows")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write JSON logs to the log directory
    #[arg(long, global = true)]
    json_logs: bool,

    /// Directory for JSON logs (implies --json-logs)
    #[arg(long, env = "TABLEKIT_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rows that pass a filter state
    Filter(FilterArgs),
    /// List filter operators
    Operators {
        /// Only the operators offered for this column variant
        #[arg(long, value_parser = parse_variant)]
        variant: Option<FilterVariant>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// JSON array of row objects
    #[arg(long)]
    rows: PathBuf,

    /// Table filter state (`columnFilters` and `globalFilter`)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Column metadata; inferred from the first row when absent
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Global search text, replacing any global filter from --state
    #[arg(long)]
    search: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Settings file; defaults to the user config directory
    #[arg(long, env = "TABLEKIT_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::from_verbosity(cli.verbose);
    if let Some(log_dir) = cli.log_dir.clone() {
        logging_config = logging_config.with_log_dir(log_dir);
    } else if cli.json_logs {
        logging_config = logging_config.with_log_dir(logging::log_directory());
    }
    let _guard = logging::init(logging_config)?;

    match cli.command {
        Command::Filter(args) => run_filter(args),
        Command::Operators { variant } => {
            println!("{}", output::render_operators(variant));
            Ok(())
        }
    }
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let settings = match &args.config {
        Some(path) => FilterSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => FilterSettings::load().context("Failed to load settings")?,
    };

    let rows = input::load_rows(&args.rows)?;
    let columns = match &args.columns {
        Some(path) => input::load_columns(path)?,
        None => input::infer_columns(&rows),
    };
    let mut state = match &args.state {
        Some(path) => input::load_state(path)?,
        None => TableFilterState::new(),
    };
    if let Some(search) = args.search {
        state.global_filter = Some(GlobalFilter::Search(search));
    }

    let engine = FilterEngine::from_settings(&settings);
    let matched = engine.filter_rows(&rows, &columns, &state);
    tracing::info!(rows = rows.len(), matched = matched.len(), "Filtered rows");

    let selected: Vec<&Row> = matched.iter().filter_map(|&idx| rows.get(idx)).collect();
    println!("{}", output::render_rows(&selected, &columns, args.format)?);
    Ok(())
}

fn parse_variant(s: &str) -> Result<FilterVariant, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown column variant '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_args() {
        let cli = Cli::parse_from([
            "tablekit", "-vv", "filter", "--rows", "rows.json", "--search", "widget", "--format",
            "table",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Filter(args) = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(args.rows, PathBuf::from("rows.json"));
        assert_eq!(args.search.as_deref(), Some("widget"));
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.state.is_none());
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!(parse_variant("date_range"), Ok(FilterVariant::DateRange));
        assert_eq!(parse_variant("multiSelect"), Ok(FilterVariant::MultiSelect));
        assert!(parse_variant("slider").is_err());
    }
}
