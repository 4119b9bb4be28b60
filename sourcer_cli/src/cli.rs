use clap::{Parser, Subcommand, ValueEnum};
use sourcer_core::QueryType;

#[derive(Parser)]
#[command(name = "sourcer")]
#[command(about = "Query remote search services into structured result sets")]
#[command(version)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  sourcer list                          List all available sources
  sourcer search web \"rust parsers\"     Search the web source
  sourcer search web \"exact words\" --type phrase --results 10

Set SOURCER_APP_ID for sources that require an application id.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all available sources
    #[command(alias = "ls")]
    List,

    /// Search a source
    Search {
        /// Source name (see `sourcer list`)
        source: String,

        /// The search query
        query: String,

        /// 0-based index of the first result
        #[arg(long, default_value_t = 0)]
        start: u32,

        /// Number of results to request (clamped to the source's page size)
        #[arg(long, default_value_t = 20)]
        results: u32,

        /// Query words interpretation
        #[arg(long = "type", value_enum, default_value_t = QueryTypeArg::All)]
        query_type: QueryTypeArg,

        /// Restrict results to a language code
        #[arg(long)]
        language: Option<String>,

        /// Application id to send to the service
        #[arg(long, env = "SOURCER_APP_ID")]
        app_id: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QueryTypeArg {
    All,
    Any,
    Phrase,
}

impl From<QueryTypeArg> for QueryType {
    fn from(value: QueryTypeArg) -> Self {
        match value {
            QueryTypeArg::All => QueryType::All,
            QueryTypeArg::Any => QueryType::Any,
            QueryTypeArg::Phrase => QueryType::Phrase,
        }
    }
}
