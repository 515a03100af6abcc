//! # yr-cli
//!
//! Command-line client for yr.no place forecasts.
//!
//! Fetches a forecast (or reads a saved `forecast.xml`), maps it with the
//! weather schema, and prints the result as JSON or YAML on stdout. Logs go
//! to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use yr_client::{ClientConfig, ForecastClient};
use yr_schema::{weather_schema, Schema, SchemaLoader};

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 3;
const EXIT_TRANSPORT: u8 = 4;

#[derive(Parser)]
#[command(name = "yr")]
#[command(about = "Fetch yr.no forecasts as structured data")]
#[command(version)]
struct Cli {
    /// Path to a YAML client configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the forecast for a place
    Fetch {
        /// Country, e.g. "Sweden"
        country: String,

        /// Region or county, e.g. "Skåne"
        area: String,

        /// Place name, e.g. "Malmö"
        city: String,

        /// Server base URL (overrides the configuration file)
        #[arg(long)]
        server: Option<String>,

        /// Request timeout in seconds (overrides the configuration file)
        #[arg(long)]
        timeout: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Map a saved forecast.xml file
    Parse {
        /// Input file path
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the built-in weather schema
    Schema {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Schema file (YAML or JSON) to use instead of the built-in one
    #[arg(short, long)]
    schema: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("ERROR: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch {
            country,
            area,
            city,
            server,
            timeout,
            output,
        } => {
            if let Some(server) = server {
                config = config.server(server);
            }
            if let Some(timeout) = timeout {
                config = config.timeout_secs(timeout);
            }

            let client = build_client(config, output.schema.as_deref())?;
            tracing::info!(
                "Fetching forecast for {}/{}/{} from {}",
                country,
                area,
                city,
                client.config().server
            );

            let record = tokio::task::spawn_blocking(move || {
                client.fetch_forecast(&country, &area, &city)
            })
            .await
            .context("forecast task did not complete")??;

            print_rendered(&record, output.format)
        }
        Commands::Parse { input, output } => {
            let client = build_client(config, output.schema.as_deref())?;
            tracing::info!("Mapping {}", input.display());

            let xml = std::fs::read_to_string(&input)
                .with_context(|| format!("cannot read {}", input.display()))?;
            let record = client
                .parse_forecast(&xml)
                .with_context(|| format!("cannot map {}", input.display()))?;

            print_rendered(&record, output.format)
        }
        Commands::Schema { format } => print_rendered(weather_schema(), format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    match path {
        Some(path) => {
            tracing::info!("Using configuration {}", path.display());
            Ok(ClientConfig::from_file(path)?)
        }
        None => Ok(ClientConfig::default()),
    }
}

fn build_client(config: ClientConfig, schema: Option<&Path>) -> anyhow::Result<ForecastClient> {
    let client = ForecastClient::with_config(config);
    match schema {
        Some(path) => Ok(client.with_schema(load_schema(path)?)),
        None => Ok(client),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    SchemaLoader::new()
        .load_from_file(path)
        .with_context(|| format!("cannot load schema {}", path.display()))
}

fn print_rendered<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    print!("{rendered}");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(client_err) = cause.downcast_ref::<yr_client::Error>() {
            return match client_err {
                yr_client::Error::Config { .. } => EXIT_CONFIG,
                other if other.is_transport() => EXIT_TRANSPORT,
                _ => EXIT_FAILURE,
            };
        }
        if cause.is::<yr_schema::Error>() {
            return EXIT_CONFIG;
        }
    }
    EXIT_FAILURE
}
