//! Core application

use std::path::Path;

use anyhow::{Context, Result};

use formbase::filters::{FilterCondition, FilterSet, JoinMode, parse_filter_set, validate_filter};
use formbase::{FieldCatalog, RecordClient, RecordQuery};

use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::utils::file::read_input;

pub struct FormbaseApp;

impl FormbaseApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!(app = APP_NAME, "Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Commands::Compile { filters, fields } => {
                let output = compile_filters(&filters, fields.as_deref())?;
                println!("{}", output);
            }
            Commands::Validate {
                condition,
                value,
                numeric,
            } => {
                validate_predicate(condition, numeric, &value)?;
                println!("valid");
            }
            Commands::Url { form_id, filters } => {
                let config = AppConfig::load(&cli_config)?;
                println!("{}", record_url(&config, form_id, &filters)?);
            }
            Commands::Fetch { form_id, filters } => {
                Self::fetch(&cli_config, form_id, &filters).await?;
            }
        }

        Ok(())
    }

    async fn fetch(cli: &CliConfig, form_id: i64, filters: &Path) -> Result<()> {
        let config = AppConfig::load(cli)?;
        let set = load_filter_set(filters, None)?;

        let client = RecordClient::new(config.client_config())
            .context("Failed to create HTTP client")?;
        let rows = client
            .filter_records_checked(form_id, &set)
            .await
            .with_context(|| format!("Failed to fetch records for form {}", form_id))?;

        tracing::info!(form_id, records = rows.len(), "Fetched records");
        println!("{}", serde_json::to_string_pretty(&rows)?);
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        // Logs go to stderr so stdout stays pipeable
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Read and parse a filter set, validating against a catalog when given
fn load_filter_set(path: &Path, catalog: Option<&FieldCatalog>) -> Result<FilterSet> {
    let json = read_input(path)?;
    let set = parse_filter_set(&json, catalog)
        .with_context(|| format!("Invalid filter set: {}", path.display()))?;
    warn_suspicious(&set);
    Ok(set)
}

/// Log predicates whose text would alter the query grammar, and empty OR sets
fn warn_suspicious(set: &FilterSet) {
    for predicate in &set.predicates {
        let reserved = predicate.reserved_chars();
        if !reserved.is_empty() {
            let chars: String = reserved.into_iter().collect();
            tracing::warn!(
                predicate = %predicate,
                chars = %chars,
                "Filter contains query grammar characters; they are sent unescaped"
            );
        }
    }
    if set.is_empty() && set.join == JoinMode::Or {
        tracing::warn!("Empty OR filter set compiles to 'or=()'");
    }
}

/// Compile a filter set file, optionally validated against a field rows file
pub fn compile_filters(filters: &Path, fields: Option<&Path>) -> Result<String> {
    let catalog = match fields {
        Some(path) => {
            let json = read_input(path)?;
            let catalog = FieldCatalog::from_json(&json)
                .with_context(|| format!("Invalid field rows: {}", path.display()))?;
            tracing::debug!(fields = catalog.len(), "Loaded field catalog");
            Some(catalog)
        }
        None => None,
    };

    let set = load_filter_set(filters, catalog.as_ref())?;
    Ok(set.compile())
}

/// Validate a single predicate, failing with the rejection reason
pub fn validate_predicate(condition: FilterCondition, numeric: bool, value: &str) -> Result<()> {
    validate_filter(condition, "<field>", numeric, value)?;
    Ok(())
}

/// Full record URL for a form and filter set file
pub fn record_url(config: &AppConfig, form_id: i64, filters: &Path) -> Result<String> {
    let set = load_filter_set(filters, None)?;
    let query = RecordQuery::new(form_id).with_filters(&set);
    Ok(query.url(&config.api.base_url, &config.api.record_endpoint))
}
