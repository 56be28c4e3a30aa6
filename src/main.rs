//! Paxboard CLI
//!
//! Command-line dashboard for revenue and passenger metrics:
//! - Print revenue and passenger cards for a date range
//! - Drive a session interactively from stdin
//! - Format single values
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use paxboard::config::{generate_default_config, Config};
use paxboard::dashboard::{Card, DashboardSession, Severity};
use paxboard::format::{format_value, FormatOptions, ValueStyle};
use paxboard::metrics::{CachedMetricClient, HttpMetricClient, MetricClient, MetricKey};
use paxboard::range::types::parse_date;
use paxboard::range::DateRangeValidator;

/// Exit code for a rejected date range
const EXIT_INVALID_RANGE: i32 = 2;

#[derive(Parser)]
#[command(name = "paxboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Revenue and passenger dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Metrics API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show revenue and passenger cards for a date range
    Dashboard {
        /// First day (YYYY-MM-DD); defaults to the last 7 days
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Last day (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Locale for numbers (overrides config)
        #[arg(long)]
        locale: Option<String>,
        /// Currency code for revenue (overrides config)
        #[arg(long)]
        currency: Option<String>,
    },

    /// Read `range FROM TO`, `reset`, `show`, `quit` commands from stdin
    Interactive {
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        currency: Option<String>,
    },

    /// Format a single value
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// compact or currency
        #[arg(short, long, default_value = "compact")]
        style: String,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        currency: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

enum Event {
    Line(Option<String>),
    Update(MetricKey),
}

/// Locale and currency after CLI flags are applied over config
struct DisplaySettings {
    locale: String,
    currency: String,
}

impl DisplaySettings {
    fn resolve(config: &Config, locale: Option<String>, currency: Option<String>) -> Self {
        Self {
            locale: locale.unwrap_or_else(|| config.display.locale.clone()),
            currency: currency.unwrap_or_else(|| config.display.currency.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.client.base_url = url;
    }
    paxboard::logging::init(&config.logging);

    match cli.command {
        Commands::Dashboard {
            from,
            to,
            format,
            locale,
            currency,
        } => {
            let display = DisplaySettings::resolve(&config, locale, currency);
            run_dashboard(&config, from.zip(to), format, &display).await
        }
        Commands::Interactive { locale, currency } => {
            let display = DisplaySettings::resolve(&config, locale, currency);
            run_interactive(&config, &display).await
        }
        Commands::Format {
            value,
            style,
            locale,
            currency,
        } => {
            let display = DisplaySettings::resolve(&config, locale, currency);
            let style: ValueStyle = style.parse()?;
            let options = FormatOptions::default()
                .style(style)
                .locale(display.locale)
                .currency_code(display.currency);
            println!("{}", format_value(value, &options)?);
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    }
}

fn build_client(config: &Config) -> anyhow::Result<Arc<dyn MetricClient>> {
    let http = HttpMetricClient::new(config.client.http()).context("creating metrics client")?;
    Ok(Arc::new(CachedMetricClient::new(
        Arc::new(http),
        config.client.stale_time(),
    )))
}

fn print_notifications<C: paxboard::Clock>(session: &mut DashboardSession<C>) {
    for note in session.take_notifications() {
        let label = match note.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{}: {}", label, note.message);
    }
}

async fn run_dashboard(
    config: &Config,
    requested: Option<(String, String)>,
    format: OutputFormat,
    display: &DisplaySettings,
) -> anyhow::Result<()> {
    let mut session = DashboardSession::new(build_client(config)?, DateRangeValidator::default_window());

    match requested {
        Some((from, to)) => {
            let selected = parse_date(&from)
                .and_then(|from| parse_date(&to).map(|to| (from, to)))
                .and_then(|(from, to)| session.select_range(from, to));
            if let Err(e) = selected {
                eprintln!("{}", e);
                std::process::exit(EXIT_INVALID_RANGE);
            }
        }
        None => session.refresh(),
    }

    session.settle().await;
    print_notifications(&mut session);

    let cards = session
        .panels()
        .map(|panel| Card::build(panel, &display.locale, &display.currency))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Table => {
            for card in &cards {
                println!("{}", card);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
    }

    Ok(())
}

async fn run_interactive(config: &Config, display: &DisplaySettings) -> anyhow::Result<()> {
    let mut session = DashboardSession::new(build_client(config)?, DateRangeValidator::default_window());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Range {}. Commands: range FROM TO | reset | show | quit", session.range());
    session.refresh();

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            Some(metric) = session.next_update(), if session.is_pending() => Event::Update(metric),
        };

        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) => {
                let words: Vec<&str> = line.split_whitespace().collect();
                match words.as_slice() {
                    [] => {}
                    ["range", from, to] => {
                        match parse_date(from).and_then(|f| parse_date(to).map(|t| (f, t))) {
                            Ok((from, to)) => {
                                if let Ok(range) = session.select_range(from, to) {
                                    println!("Range {}", range);
                                }
                            }
                            Err(e) => eprintln!("{}", e),
                        }
                    }
                    ["reset"] => println!("Range {}", session.reset_range()),
                    ["show"] => {
                        for panel in session.panels() {
                            println!("{}", Card::build(panel, &display.locale, &display.currency)?);
                        }
                    }
                    ["quit"] | ["exit"] => break,
                    _ => eprintln!("Unknown command: {}", line.trim()),
                }
            }
            Event::Update(metric) => {
                if let Some(panel) = session.panel(metric) {
                    println!("{}", Card::build(panel, &display.locale, &display.currency)?);
                }
            }
        }
        print_notifications(&mut session);
    }

    Ok(())
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config).with_context(|| format!("writing {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
