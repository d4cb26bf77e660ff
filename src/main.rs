// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value
)]

use clap::Parser;

use sptable::cli::commands::{Cli, Command};
use sptable::cli::output::{self, OutputFormat};
use sptable::config::Config;
use sptable::db::Database;
use sptable::error::SptError;
use sptable::models::RecordFilter;
use sptable::operations::{self, GrepField, RowsResult};
use sptable::source::ReportSource;

fn main() {
    let cli = Cli::parse();

    let default_level = if matches!(cli.command, Command::Mcp) {
        "info"
    } else {
        "warn"
    };
    sptable::logging::init(default_level);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::fmt::Display>> {
    match cli.command {
        Command::Parse { input } => cmd_parse(&input),
        Command::Generate => cmd_generate(),
        Command::Collect { input } => cmd_collect(input.as_deref()),
        Command::Query {
            section,
            subsection,
            data_type,
            key,
            limit,
        } => cmd_query(
            RecordFilter {
                section,
                subsection,
                data_type,
                key,
            },
            limit,
        ),
        Command::Grep { pattern, field } => cmd_grep(&pattern, &field),
        Command::Sections => cmd_sections(),
        Command::Stats => cmd_stats(),
        Command::Columns => cmd_columns(),
        Command::Types => cmd_types(),
        Command::Mcp => cmd_mcp(),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

/// Open the snapshot database; reading commands need a prior collect.
fn get_db(config: &Config) -> Result<Database, Box<dyn std::fmt::Display>> {
    if !config.db_exists() {
        return Err(map_err(SptError::NoSnapshot));
    }
    Database::open(&config.db_path).map_err(map_err)
}

fn row_format(config: &Config) -> OutputFormat {
    OutputFormat::parse(&config.settings.output.format)
}

/// Print parsed rows. A partial read prints what was parsed before failing.
fn print_rows(result: sptable::error::Result<RowsResult>, format: OutputFormat) -> CmdResult {
    match result {
        Ok(rows) => {
            println!("{}", output::format_rows(&rows.rows, format));
            Ok(())
        }
        Err(SptError::Read(e)) => {
            println!("{}", output::format_rows(e.records(), format));
            Err(map_err(e))
        }
        Err(e) => Err(map_err(e)),
    }
}

fn cmd_parse(input: &str) -> CmdResult {
    let config = get_config()?;
    let source = ReportSource::from_input(Some(input), &config.settings.profiler);
    let result = operations::parse_source(&source, &config.classification_table());
    print_rows(result, row_format(&config))
}

fn cmd_generate() -> CmdResult {
    let config = get_config()?;
    print_rows(operations::generate(&config), row_format(&config))
}

fn cmd_collect(input: Option<&str>) -> CmdResult {
    let config = get_config()?;
    let source = ReportSource::from_input(input, &config.settings.profiler);
    let result = operations::collect(&config, &source).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_query(filter: RecordFilter, limit: Option<usize>) -> CmdResult {
    let config = get_config()?;
    let db = get_db(&config)?;
    let result = operations::query_records(&db, &filter, limit).map_err(map_err)?;
    println!("{}", output::format_rows(&result.rows, row_format(&config)));
    Ok(())
}

fn cmd_grep(pattern: &str, field: &str) -> CmdResult {
    let field: GrepField = field.parse().map_err(map_err)?;
    let config = get_config()?;
    let db = get_db(&config)?;
    let result = operations::grep_records(&db, pattern, field).map_err(map_err)?;
    println!("{}", output::format_rows(&result.rows, row_format(&config)));
    Ok(())
}

fn cmd_sections() -> CmdResult {
    let config = get_config()?;
    let db = get_db(&config)?;
    let result = operations::list_sections(&db).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_stats() -> CmdResult {
    let config = get_config()?;
    let result = if config.db_exists() {
        let db = Database::open(&config.db_path).map_err(map_err)?;
        operations::get_stats(&db).map_err(map_err)?
    } else {
        operations::get_stats(&Database::open_in_memory().map_err(map_err)?).map_err(map_err)?
    };
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_columns() -> CmdResult {
    println!("{}", output::format_json(&operations::list_columns()));
    Ok(())
}

fn cmd_types() -> CmdResult {
    let config = get_config()?;
    let result = operations::list_types(&config.classification_table());
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_mcp() -> CmdResult {
    let rt = tokio::runtime::Runtime::new().map_err(map_err)?;
    rt.block_on(async {
        sptable::mcp::server::start_mcp_server()
            .await
            .map_err(map_err)
    })
}
