use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;
use wdfw_harvest::config::{
    DEFAULT_BASE_URL_TEMPLATE, DEFAULT_END_YEAR, DEFAULT_START_YEAR, RunConfig,
    default_output_path, render_url,
};
use wdfw_harvest::output::write_records;
use wdfw_harvest::scraper::{ScraperError, WebScraper};
use wdfw_harvest::types::{FlatRecord, OutputFormat, SummaryRecord};
use wdfw_harvest::utils::HarvestStats;

#[derive(Parser)]
#[command(name = "wdfw-harvest")]
#[command(about = "A WDFW deer harvest report scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one record per unit and harvest method for a range of years
    Methods {
        #[arg(long, default_value_t = DEFAULT_START_YEAR, help = "First report year")]
        start_year: u16,

        #[arg(long, default_value_t = DEFAULT_END_YEAR, help = "Last report year (inclusive)")]
        end_year: u16,

        #[arg(
            short = 'o',
            long,
            help = "Output file [default: deer_harvest_<start>_<end>.<format>]"
        )]
        output: Option<PathBuf>,

        #[arg(
            short = 'f',
            long = "format",
            value_parser = parse_format,
            default_value = "csv",
            help = "Output format (csv or json)"
        )]
        format: OutputFormat,

        #[arg(
            long,
            default_value = DEFAULT_BASE_URL_TEMPLATE,
            help = "Report URL with a {year} placeholder"
        )]
        base_url_template: String,

        #[arg(long, default_value_t = 1000, help = "Delay between page fetches in milliseconds")]
        delay_ms: u64,
    },
    /// Scrape one aggregated archery/overall record per unit for a single year
    Summary {
        #[arg(long, default_value_t = DEFAULT_END_YEAR, help = "Report year")]
        year: u16,

        #[arg(long, help = "Report URL, overriding the one derived from --year")]
        url: Option<String>,

        #[arg(
            short = 'o',
            long,
            help = "Output file [default: deer_harvest_<year>.<format>]"
        )]
        output: Option<PathBuf>,

        #[arg(
            short = 'f',
            long = "format",
            value_parser = parse_format,
            default_value = "csv",
            help = "Output format (csv or json)"
        )]
        format: OutputFormat,
    },
}

/// A page that cannot be fetched yields no records, the same as a page with
/// no unit tables. Only a malformed URL is an error.
async fn summary_records(
    scraper: &WebScraper,
    url: &str,
) -> Result<Vec<SummaryRecord>, ScraperError> {
    match scraper.fetch_summary(url).await {
        Err(ScraperError::HttpError(e)) => {
            log::warn!("{}: Failed to fetch ({})", url, e);
            Ok(Vec::new())
        }
        result => result,
    }
}

fn save<T: FlatRecord + Serialize>(records: &[T], config: &RunConfig) {
    if records.is_empty() {
        println!("No data found. The page structure may have changed.");
        return;
    }

    write_records(&config.output_path, records, config.format).unwrap_or_else(|e| {
        log::error!(
            "Error writing {}: {}",
            config.output_path.display(),
            e
        );
        process::exit(1);
    });

    println!(
        "Wrote {} records to {}",
        records.len(),
        config.output_path.display()
    );
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let scraper = WebScraper::new().unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    match cli.command {
        Commands::Methods {
            start_year,
            end_year,
            output,
            format,
            base_url_template,
            delay_ms,
        } => {
            let config = RunConfig {
                start_year,
                end_year,
                output_path: output
                    .unwrap_or_else(|| default_output_path(start_year, end_year, format)),
                base_url_template,
                delay: Duration::from_millis(delay_ms),
                format,
            };

            let config = config.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            log::info!(
                "Scraping deer harvest data from {} to {}...",
                config.start_year,
                config.end_year
            );

            let records = scraper.fetch_years(&config).await;

            save(&records, &config);
            if !records.is_empty() {
                print!("{}", HarvestStats::from_records(&records));
            }
        }

        Commands::Summary {
            year,
            url,
            output,
            format,
        } => {
            let config = RunConfig {
                start_year: year,
                end_year: year,
                output_path: output.unwrap_or_else(|| default_output_path(year, year, format)),
                format,
                ..Default::default()
            };

            let config = config.validate().unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            let url = url.unwrap_or_else(|| config.url_for(year));

            let records = summary_records(&scraper, &url).await.unwrap_or_else(|e| {
                log::error!("Invalid args: {e}");
                process::exit(1);
            });

            save(&records, &config);
        }
    }
}
