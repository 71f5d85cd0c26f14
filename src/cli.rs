use crate::config::{load_config, ResolvedConfig};
use crate::downloader::{download_bulletin, fetch_latest_bulletin, save_download, HttpFetcher};
use crate::errors::{AppError, AppResult};
use crate::scanner::{scan_bulletin, ScanReport};
use crate::server::{self, AppState};
use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the command-line definition.
///
/// Subcommands:
/// - `latest`: print the URL of the latest Boletín de Marcas
/// - `download`: save a bulletin PDF (the latest one unless `--url` is given)
/// - `serve`: run the HTTP API
/// - `scan`: compare extracted bulletin text against your own marks
pub fn build_command() -> Command<'static> {
    Command::new("boletin-marcas")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a TOML config file (defaults target the live INPI portal)")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .subcommand(Command::new("latest").about("Print the URL of the latest Boletín de Marcas"))
        .subcommand(
            Command::new("download")
                .about("Download a bulletin PDF")
                .after_help("Example:\n  boletin-marcas download -o ./boletines")
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .help("Bulletin URL under the allowed prefix (defaults to the latest bulletin)")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Directory to save the PDF into")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("serve").about("Run the HTTP API").arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .help("Address to listen on, e.g. 0.0.0.0:3000")
                    .action(ArgAction::Set),
            ),
        )
        .subcommand(
            Command::new("scan")
                .about("Find published marks similar to yours in extracted bulletin text")
                .arg(
                    Arg::new("text")
                        .short('t')
                        .long("text")
                        .help("Text file extracted from the bulletin PDF")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("marca")
                        .short('m')
                        .long("marca")
                        .help("One of your marks (repeatable)")
                        .required(true)
                        .action(ArgAction::Append),
                ),
        )
}

/// Parses command-line arguments and executes the selected subcommand.
pub async fn cli() -> AppResult<()> {
    let cmd = build_command();
    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("latest", _)) => {
            let fetcher = HttpFetcher::from_config(&config)?;
            let resolved = fetch_latest_bulletin(&fetcher, &config).await?;
            println!("{resolved}");
        }
        Some(("download", sub)) => {
            let url = sub.get_one::<String>("url").cloned();
            let output = sub
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| config.download_dir.clone());
            let path = run_download(&config, url, &output).await?;
            println!("{}", path.display());
        }
        Some(("serve", sub)) => {
            let mut config = config;
            if let Some(bind) = sub.get_one::<String>("bind") {
                config.bind_addr = bind.clone();
            }
            let bind_addr = config.bind_addr.clone();
            server::serve(AppState::from_config(config)?, &bind_addr).await?;
        }
        Some(("scan", sub)) => {
            let text_path = sub
                .get_one::<PathBuf>("text")
                .expect("text is required");
            let marcas: Vec<String> = sub
                .get_many::<String>("marca")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();

            let report = run_scan(text_path, &marcas).await?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::InternalError(format!("Failed to encode report: {e}")))?;
            println!("{json}");
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

async fn run_download(
    config: &ResolvedConfig,
    url: Option<String>,
    output: &Path,
) -> AppResult<PathBuf> {
    let fetcher = HttpFetcher::from_config(config)?;
    let url = match url {
        Some(url) => url,
        None => fetch_latest_bulletin(&fetcher, config).await?.url,
    };

    let download = download_bulletin(&fetcher, &url, config).await?;
    let path = save_download(&download, output).await?;
    info!(file_path = %path.display(), "Bulletin saved");
    Ok(path)
}

async fn run_scan(text_path: &Path, marcas: &[String]) -> AppResult<ScanReport> {
    let text = tokio::fs::read_to_string(text_path).await.map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", text_path.display(), e))
    })?;
    let report = scan_bulletin(&text, marcas);
    info!(
        entries = report.denominativas.count,
        matches = report.denominativas.matches,
        "Scan completed"
    );
    Ok(report)
}
