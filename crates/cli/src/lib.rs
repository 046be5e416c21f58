//! Command-line access to the askdata pipeline.
//!
//! Every command that needs data loads it from `--file` first, so each invocation
//! works against a dataset of its own.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};

use askdata::describe::{self, SuggestRequest};
use askdata::query::{self, QueryRequest, QueryResponse};
use askdata::state::{self, State};
use askdata::upload;
use askdata_configuration::environment::Environment;
use askdata_configuration::{
    make_runtime_configuration, parse_configuration, write_parsed_configuration, Configuration,
    ParsedConfiguration, CONFIGURATION_FILENAME,
};

#[derive(Parser, Debug)]
#[command(name = "askdata", version)]
#[command(about = "Ask questions about a CSV or JSON table in plain English")]
pub struct Cli {
    /// Directory holding configuration.json.
    #[arg(long, env = "ASKDATA_CONFIGURATION_DIR", default_value = ".")]
    pub configuration_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration and its JSON schema.
    Initialize {
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
    /// Load a dataset and answer a question about it.
    Ask {
        #[arg(long)]
        file: PathBuf,
        /// Also print the query, formatted over several lines.
        #[arg(long)]
        pretty_sql: bool,
        question: String,
    },
    /// Suggest questions for a dataset.
    Suggest {
        #[arg(long)]
        file: PathBuf,
        input: String,
    },
    /// Summarize a dataset.
    Summary {
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the JSON schema of the configuration format.
    PrintSchema,
}

/// Run a command, writing its output to `out`.
pub async fn run(
    cli: Cli,
    environment: impl Environment,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Initialize { force } => {
            initialize(&cli.configuration_dir, force).await?;
            writeln!(
                out,
                "Wrote {}",
                cli.configuration_dir.join(CONFIGURATION_FILENAME).display()
            )?;
        }
        Command::PrintSchema => {
            let schema = schemars::schema_for!(ParsedConfiguration);
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
        }
        Command::Ask {
            file,
            pretty_sql,
            question,
        } => {
            let state = load(&cli.configuration_dir, environment, &file).await?;
            let response = query::query(&state, QueryRequest { query: question }).await;
            if pretty_sql {
                if let QueryResponse::Success(success) = &response {
                    writeln!(out, "{}\n", format_sql(&success.sql_query))?;
                }
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Suggest { file, input } => {
            let state = load(&cli.configuration_dir, environment, &file).await?;
            for suggestion in describe::suggest(&state, &SuggestRequest { input }) {
                writeln!(out, "{suggestion}")?;
            }
        }
        Command::Summary { file } => {
            let state = load(&cli.configuration_dir, environment, &file).await?;
            writeln!(out, "{}", describe::summary(&state))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn initialize(configuration_dir: &Path, force: bool) -> anyhow::Result<()> {
    let configuration_file = configuration_dir.join(CONFIGURATION_FILENAME);
    if !force && tokio::fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite it",
            configuration_file.display()
        );
    }
    write_parsed_configuration(ParsedConfiguration::initial(), configuration_dir).await?;
    Ok(())
}

/// Read the configuration, falling back to the defaults when the directory has none.
async fn read_configuration(
    configuration_dir: &Path,
    environment: impl Environment,
) -> anyhow::Result<Configuration> {
    let parsed = if tokio::fs::try_exists(configuration_dir.join(CONFIGURATION_FILENAME)).await? {
        parse_configuration(configuration_dir).await?
    } else {
        tracing::info!(
            "No configuration in {}, using defaults",
            configuration_dir.display()
        );
        ParsedConfiguration::initial()
    };
    Ok(make_runtime_configuration(parsed, environment)?)
}

async fn load(
    configuration_dir: &Path,
    environment: impl Environment,
    file: &Path,
) -> anyhow::Result<State> {
    let configuration = read_configuration(configuration_dir, environment).await?;
    let mut registry = prometheus::Registry::new();
    let state = state::create_state(&configuration, &mut registry).await?;

    let contents = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let summary = upload::upload(
        &configuration,
        &state,
        &file.display().to_string(),
        &Bytes::from(contents),
    )?;
    tracing::info!("{}", summary.message);

    Ok(state)
}

fn format_sql(sql: &str) -> String {
    sqlformat::format(
        sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}
