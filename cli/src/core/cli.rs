use clap::{Parser, Subcommand};

use std::path::PathBuf;

use formbase::filters::FilterCondition;

use super::constants::{ENV_API_URL, ENV_CONFIG, ENV_TIMEOUT_SECS};

#[derive(Parser)]
#[command(name = "formbase")]
#[command(version, about = "Compile and run Formbase record filters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// PostgREST base URL (e.g. https://example.com/api)
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<u64>,
}

/// Parse a filter condition from its wire name (e.g. `contain`, `lessThanEqual`)
fn parse_condition(s: &str) -> Result<FilterCondition, String> {
    s.parse::<FilterCondition>().map_err(|_| {
        let valid: Vec<&str> = FilterCondition::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "Invalid condition '{}'. Valid options: {}",
            s,
            valid.join(", ")
        )
    })
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Compile a filter set into a PostgREST query string
    Compile {
        /// Filter set JSON file ("-" for stdin)
        #[arg(long, short = 'f')]
        filters: PathBuf,

        /// Field rows JSON file used to validate predicates
        #[arg(long)]
        fields: Option<PathBuf>,
    },
    /// Check whether a single predicate is valid for a field
    Validate {
        /// Filter condition (contain, identical, startWith, lessThan, ...)
        #[arg(long, value_parser = parse_condition)]
        condition: FilterCondition,

        /// Value to filter against
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// The field holds numbers
        #[arg(long)]
        numeric: bool,
    },
    /// Print the record URL for a form and filter set
    Url {
        /// Form id
        #[arg(long)]
        form_id: i64,

        /// Filter set JSON file ("-" for stdin)
        #[arg(long, short = 'f')]
        filters: PathBuf,
    },
    /// Validate a filter set against the form's fields and fetch matching records
    Fetch {
        /// Form id
        #[arg(long)]
        form_id: i64,

        /// Filter set JSON file ("-" for stdin)
        #[arg(long, short = 'f')]
        filters: PathBuf,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            timeout_secs: cli.timeout_secs,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig::from(&cli);
    (config, cli.command)
}
