use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use tolk::core::config::{self, CliOverrides};
use tolk::core::credentials;
use tolk::deepl::Formality;
use tolk::tui;

#[derive(Parser)]
#[command(name = "tolk", version, about = "Translate text from the terminal with DeepL")]
struct Args {
    /// Target language code, e.g. DE or EN-GB
    #[arg(short, long)]
    target: Option<String>,

    /// Source language code; omit to let DeepL detect it
    #[arg(short, long)]
    source: Option<String>,

    /// less, prefer_less, default, prefer_more or more
    #[arg(short, long, value_parser = parse_formality)]
    formality: Option<Formality>,
}

fn parse_formality(value: &str) -> Result<Formality, String> {
    Formality::from_label(value).ok_or_else(|| {
        format!("unknown formality '{value}' (expected less, prefer_less, default, prefer_more or more)")
    })
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tolk.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tolk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("tolk {} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config error, using defaults: {}", e);
        eprintln!("Warning: {e}");
        config::TolkConfig::default()
    });

    let cli = CliOverrides {
        source_language: args.source,
        target_language: args.target,
        formality: args.formality,
    };

    let resolved = config::resolve(&file_config, credentials::load_api_key(), &cli);
    log::info!(
        "Resolved config: source={:?}, target={:?}, formality={}, api_key={}",
        resolved.source_language,
        resolved.target_language,
        resolved.formality.label(),
        if resolved.api_key.is_some() { "set" } else { "missing" }
    );

    tui::run(resolved)
}
