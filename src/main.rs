use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studio_bridge::config::{BridgeConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROJECT};
use studio_bridge::{api, tree};

#[derive(Parser)]
#[command(name = "studio-bridge")]
#[command(about = "Export Roblox Studio scripts into a Rojo project tree")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the export server (the default)
    Serve(ServeArgs),
    /// Scan the project tree and print the manifest
    Manifest {
        #[command(flatten)]
        target: ProjectArgs,

        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved project directories
    Paths {
        #[command(flatten)]
        target: ProjectArgs,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "STUDIO_BRIDGE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "STUDIO_BRIDGE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[command(flatten)]
    target: ProjectArgs,
}

#[derive(Args)]
struct ProjectArgs {
    /// Directory containing the project folder (defaults to the current directory)
    #[arg(long, env = "STUDIO_BRIDGE_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Name of the project folder
    #[arg(long, env = "STUDIO_BRIDGE_PROJECT", default_value = DEFAULT_PROJECT)]
    project: String,
}

impl ProjectArgs {
    fn into_config(self) -> anyhow::Result<BridgeConfig> {
        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not determine current directory")?,
        };
        let base_dir = base_dir.canonicalize().unwrap_or(base_dir);
        BridgeConfig::new(base_dir, &self.project).context("Invalid project name")
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "studio_bridge=info,tower_http=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.target.into_config()?;
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}/export", addr);
    tracing::info!("Writing exports under: {}", config.project_root().display());

    axum::serve(listener, api::create_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    tracing::info!("Shutting down server...");
}

fn print_manifest(config: &BridgeConfig, json: bool) -> anyhow::Result<()> {
    let manifest = tree::scan(&config.source_root())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&manifest.entries)?);
        return Ok(());
    }

    for entry in &manifest.entries {
        println!("{}  ({})", entry.relative_file, entry.kind);
    }
    println!("{} scripts", manifest.entries.len());
    if manifest.skipped > 0 {
        println!("{} script files skipped (run with RUST_LOG=debug for details)", manifest.skipped);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        Some(Commands::Manifest { target, json }) => {
            print_manifest(&target.into_config()?, json)?;
        }
        Some(Commands::Paths { target }) => {
            let config = target.into_config()?;
            println!("project: {}", config.project_root().display());
            println!("source:  {}", config.source_root().display());
        }
        None => serve(cli.serve).await?,
    }

    Ok(())
}
