use app_state::{CacheBackend, load_app_settings};
use clap::Parser;
use cli::{analyze_all, read_url_list};
use color_eyre::Result;
use color_eyre::eyre::bail;
use common_services::context::ServiceContext;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Analyze eyewear product images and print the results as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Image urls to analyze.
    urls: Vec<String>,

    /// Read additional urls from a file, one per line.
    #[clap(long, short)]
    file: Option<PathBuf>,

    /// Keep results in memory instead of the configured cache backend.
    #[clap(long, default_value_t = false, action)]
    memory_cache: bool,

    /// Pretty-print the JSON output.
    #[clap(long, short, default_value_t = false, action)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let mut settings = load_app_settings()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &settings.logging.level;
            format!("warn,cli={level},common_services={level},ml_analysis={level}").into()
        }))
        .with_writer(std::io::stderr)
        .init();

    let mut urls: Vec<String> = args
        .urls
        .iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();
    if let Some(file) = &args.file {
        urls.extend(read_url_list(&tokio::fs::read_to_string(file).await?));
    }
    if urls.is_empty() {
        bail!("no image urls given, pass them as arguments or with --file");
    }

    if args.memory_cache {
        settings.cache.backend = CacheBackend::Memory;
    }
    let context = ServiceContext::init(&settings).await?;
    let results = analyze_all(&context.analysis, urls).await;
    context.shutdown().await;
    let results = results?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        warn!("{failed} of {} images could not be analyzed", results.len());
    } else {
        info!("Analyzed {} images", results.len());
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{output}");
    Ok(())
}
