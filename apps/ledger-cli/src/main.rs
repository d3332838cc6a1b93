mod dto;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use ledger_db::DbHandle;
use mimalloc::MiMalloc;
use reports::config::ReportsConfig;
use reports::contract::{FilterSpec, PageArgs, Report, ReportsApi};
use reports::Reports;
use runtime::{AppConfig, CliArgs};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::dto::{Connection, Count};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Report Ledger - paginated access to append-only execution reports
#[derive(Parser)]
#[command(name = "report-ledger")]
#[command(about = "Report Ledger - paginated access to append-only execution reports")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration and database access
    Check,
    /// Append a report
    Append {
        #[arg(long)]
        input: u64,
        #[arg(long)]
        output: u64,
        /// Payload as hex, optional 0x prefix
        #[arg(long, default_value = "")]
        payload: String,
    },
    /// Fetch the report stored at an exact coordinate
    Get {
        #[arg(long)]
        input: u64,
        #[arg(long)]
        output: u64,
    },
    /// Count reports matching the filters
    Count {
        /// Equality filter, e.g. InputIndex=3 (repeatable)
        #[arg(long = "filter", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },
    /// List one page of reports
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, allow_negative_numbers = true)]
    first: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    last: Option<i64>,
    #[arg(long)]
    after: Option<String>,
    #[arg(long)]
    before: Option<String>,
    /// Only reports produced by this input
    #[arg(long, conflicts_with = "filters")]
    input: Option<u64>,
    /// Equality filter, e.g. OutputIndex=0 (repeatable)
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    filters: Vec<String>,
}

impl ListArgs {
    fn page_args(&self) -> PageArgs {
        PageArgs {
            first: self.first,
            last: self.last,
            after: self.after.clone(),
            before: self.before.clone(),
        }
    }
}

/// `Field=value` → equality filter. Field names are checked by the engine.
fn parse_filter(raw: &str) -> Result<FilterSpec> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("filter must look like Field=value (got: {raw})"))?;
    Ok(FilterSpec::eq(field.trim(), value.trim()))
}

fn parse_filters(raw: &[String]) -> Result<Vec<FilterSpec>> {
    raw.iter().map(|f| parse_filter(f)).collect()
}

fn parse_payload(hex_str: &str) -> Result<Vec<u8>> {
    let s = hex_str.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(s).with_context(|| format!("payload is not valid hex: {hex_str}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, config.home_path());
    tracing::debug!(home_dir = %config.home_dir, "Report Ledger starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let reports = init_reports(&config).await?;
    let api = reports.client();

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            let total = api.count_reports(&[]).await?;
            tracing::info!(total, "Configuration check passed");
            print_json(&Count { total_count: total })
        }
        Commands::Append {
            input,
            output,
            payload,
        } => {
            let report = Report::new(input, output, parse_payload(&payload)?);
            print_json(&api.create_report(report).await?)
        }
        Commands::Get { input, output } => match api.get_report(input, output).await? {
            Some(report) => print_json(&report),
            None => Err(anyhow!("no report at input {input}, output {output}")),
        },
        Commands::Count { filters } => {
            let total = api.count_reports(&parse_filters(&filters)?).await?;
            print_json(&Count { total_count: total })
        }
        Commands::List(list) => {
            let page_args = list.page_args();
            let page = match list.input {
                Some(input) => api.list_reports_by_input(&page_args, input).await?,
                None => {
                    api.list_reports(&page_args, &parse_filters(&list.filters)?)
                        .await?
                }
            };
            print_json(&Connection::from(&page))
        }
    }
}

async fn init_reports(config: &AppConfig) -> Result<Reports> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database not configured"))?;
    if db_config.url.trim().is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = db_config.resolved_url(config.home_path())?;
    tracing::info!("Connecting to database: {}", url);
    let db = DbHandle::connect(&url, db_config.connect_opts())
        .await
        .with_context(|| format!("cannot open database {url}"))?;

    let reports_cfg: ReportsConfig = config.module_config("reports")?;
    Reports::init(Arc::new(db), reports_cfg).await
}
