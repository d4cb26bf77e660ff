use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sptable",
    version,
    about = "Flatten macOS system_profiler reports into a queryable table",
    after_help = "Rows have five text columns: section, subsection, key, value, data_type. \
                  'parse' and 'generate' print rows without touching the database; \
                  'collect' stores a snapshot that 'query', 'grep', 'sections' and 'stats' read."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a saved report into rows.
    ///
    /// Reads the text printed by `system_profiler` from a file or stdin and prints
    /// one row per `key: value` entry. Lines that are neither headings nor
    /// entries are dropped.
    Parse {
        /// Report file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
    },

    /// Run system_profiler and print its rows (empty off macOS)
    Generate,

    /// Parse a report and store it as a snapshot in .sptable/inventory.db.
    ///
    /// Without --input, runs system_profiler as configured in .sptable/config.toml.
    /// Nothing is stored when the rows match the latest snapshot.
    Collect {
        /// Report file, or "-" for stdin (default: run system_profiler)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Rows of the latest snapshot, filtered by exact column values
    Query {
        /// Section name (e.g. "Storage")
        #[arg(long)]
        section: Option<String>,
        /// Subsection name (e.g. "Macintosh HD")
        #[arg(long)]
        subsection: Option<String>,
        /// Data type (e.g. "SPStorageDataType"); pass "" for unclassified rows
        #[arg(long)]
        data_type: Option<String>,
        /// Entry key (e.g. "Capacity")
        #[arg(long)]
        key: Option<String>,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Regex search over keys and values of the latest snapshot
    Grep {
        /// Regex pattern
        pattern: String,
        /// Column to match: key, value, any
        #[arg(short, long, default_value = "any")]
        field: String,
    },

    /// Sections of the latest snapshot with data types and row counts
    Sections,

    /// Snapshot store statistics
    Stats,

    /// Output columns of the table
    Columns,

    /// Section to data type table in effect (built-in plus config)
    Types,

    /// Start MCP server (stdio transport)
    Mcp,
}
