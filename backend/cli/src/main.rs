use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use voxnote_config::{config_file_path, load_and_prepare, VoxConfig};
use voxnote_gateway::{start_server, GatewayState};
use voxnote_pipeline::MemoPipeline;

#[derive(Parser)]
#[command(name = "voxnote")]
#[command(about = "VoxNote — voice memos into Notion rows")]
#[command(version)]
struct Cli {
    /// Path to the config file (default: ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the upload gateway server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Process one audio file without the server
    Process {
        /// Path to the audio file
        file: PathBuf,
    },
    /// Check whether a running gateway is healthy
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    let config = load_and_prepare(&config_path).await?;

    init_tracing(&config);

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            serve(config, port).await?;
        }
        Commands::Process { file } => {
            process_file(config, &file).await?;
        }
        Commands::Status => {
            status(&config).await?;
        }
    }

    Ok(())
}

fn init_tracing(config: &VoxConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}

async fn serve(config: VoxConfig, port: u16) -> Result<()> {
    let pipeline = Arc::new(MemoPipeline::from_env(&config)?);
    let state = GatewayState::new(&config, pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(
        port,
        destinations = config.destinations.len(),
        "Starting VoxNote gateway"
    );
    start_server(addr, state).await
}

async fn process_file(config: VoxConfig, file: &std::path::Path) -> Result<()> {
    let pipeline = MemoPipeline::from_env(&config)?;
    let report = pipeline.process(file).await?;

    println!("Destination: {} ({})", report.destination, report.database_id);
    println!("Write: {}", report.write.label());
    for (name, value) in report.properties.iter() {
        match value.as_text() {
            Some(text) => println!("{name}: {text}"),
            None => println!("{name}: [{}]", value.kind()),
        }
    }
    Ok(())
}

async fn status(config: &VoxConfig) -> Result<()> {
    let client = reqwest::Client::new();
    let url = format!("http://localhost:{}/api/health", config.server.port);
    match client.get(&url).send().await {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("VoxNote is not running on port {}", config.server.port);
        }
    }
    Ok(())
}
