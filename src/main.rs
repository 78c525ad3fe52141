use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use acep_frame::models::AppConfig;
use acep_frame::pipeline::{self, Pipeline};
use acep_frame::server;
use acep_frame::services::WriteOutcome;

#[derive(Parser)]
#[command(name = "acep-frame")]
#[command(about = "Converts photos into frame buffers for 7-color ACeP e-paper displays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the input folder and convert new photos
    Watch,
    /// Watch the input folder and serve converted frames over HTTP
    Serve,
    /// Convert the given photos once and exit
    Convert {
        /// Photos to convert (PNG or JPEG)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output folder (defaults to the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Watch) => {
            init_tracing("acep_frame=info");
            run_watch(load_config()).await
        }
        Some(Commands::Serve) => {
            init_tracing("acep_frame=info,tower_http=debug");
            run_server(load_config()).await
        }
        Some(Commands::Convert { inputs, output }) => {
            init_tracing("acep_frame=warn");
            run_convert_command(load_config(), &inputs, output)
        }
        None => {
            run_status_command(&load_config());
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn config_path() -> PathBuf {
    std::env::var("CONFIG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yaml"))
}

fn load_config() -> AppConfig {
    AppConfig::load(&config_path()).with_overrides(|key| std::env::var(key).ok())
}

async fn run_watch(config: AppConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::start(&config)?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down, waiting for in-flight conversions");

    let summary = pipeline.shutdown().await?;
    tracing::info!(
        converted = summary.converted,
        failed = summary.failed,
        "Stopped"
    );
    Ok(())
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9999".to_string());

    // The server owns the conversion pipeline, so photos dropped into the
    // input folder show up in the rotation without a separate process.
    let pipeline = Pipeline::start(&config)?;

    let state = server::create_app_state(&config);
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "acep-frame server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pipeline.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

/// Convert photos directly (no watcher needed)
fn run_convert_command(
    mut config: AppConfig,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(dir) = output {
        config.output_dir = dir;
    }
    std::fs::create_dir_all(&config.output_dir)?;

    let converter = pipeline::converter(&config);
    let mut failures = 0;
    for input in inputs {
        match converter.convert(input) {
            Ok(WriteOutcome::Written(dest)) => {
                println!("{} -> {}", input.display(), dest.display())
            }
            Ok(WriteOutcome::Skipped(dest)) => {
                println!("{} skipped, {} exists", input.display(), dest.display())
            }
            Err(e) => {
                eprintln!("{}: {e}", input.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} conversions failed", inputs.len());
    }
    Ok(())
}

fn run_status_command(config: &AppConfig) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    println!("acep-frame v{VERSION}");
    println!("Photo converter for 7-color ACeP e-paper frames\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:9999 (default)")
    );
    println!("  CONFIG_FILE = {}", config_path().display());

    println!("\nFolders:");
    println!("  Input:   {}", describe_dir(&config.input_dir, &["png", "jpg", "jpeg"]));
    println!("  Output:  {}", describe_dir(&config.output_dir, &["h"]));

    println!("\nConversion:");
    println!("  Workers:      {}", config.worker_count());
    println!(
        "  Stability:    {} ms x {} polls",
        config.stability.poll_interval_ms,
        config.stability.poll_limit()
    );
    println!("  On duplicate: {:?}", config.on_duplicate);

    println!("\nUsage:");
    println!("  acep-frame watch              Convert new photos as they arrive");
    println!("  acep-frame serve              Convert and serve frames over HTTP");
    println!("  acep-frame convert <FILE>...  Convert photos once");
}

fn describe_dir(dir: &Path, extensions: &[&str]) -> String {
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            let count = entries
                .filter_map(Result::ok)
                .filter(|e| {
                    e.path()
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| extensions.iter().any(|x| ext.eq_ignore_ascii_case(x)))
                })
                .count();
            let noun = if count == 1 { "file" } else { "files" };
            format!("{} ({count} {noun})", dir.display())
        }
        Err(_) => format!("{} (missing)", dir.display()),
    }
}
