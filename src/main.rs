//! scanhub-server - project service with attribute-level access control

use clap::{Args, Parser, Subcommand};
use scanhub::auth::rbac::{ExportFormat, ExportView, RbacSystem};
use scanhub::{Config, HubError, modules, server};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scanhub-server", version, about)]
struct Cli {
    /// Configuration file; the environment is used when it does not exist
    #[arg(long, short, env = "SCANHUB_CONFIG", default_value = "config/scanhub.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Inspect the merged grants database
    #[command(subcommand)]
    Grants(GrantsCommand),
}

#[derive(Debug, Subcommand)]
enum GrantsCommand {
    /// Print the merged grants tree
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Output format
    #[arg(long, value_parser = parse_format, default_value = "yaml")]
    format: ExportFormat,
    /// Key the tree by role or by resource
    #[arg(long, value_parser = parse_view, default_value = "role")]
    by: ExportView,
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    match value {
        "json" => Ok(ExportFormat::Json),
        "yaml" => Ok(ExportFormat::Yaml),
        other => Err(format!("unknown format '{}', expected json or yaml", other)),
    }
}

fn parse_view(value: &str) -> Result<ExportView, String> {
    match value {
        "role" => Ok(ExportView::Role),
        "resource" => Ok(ExportView::Resource),
        other => Err(format!("unknown view '{}', expected role or resource", other)),
    }
}

async fn load_config(path: &Path) -> Result<Config, HubError> {
    if path.exists() {
        Config::from_file(path).await
    } else {
        warn!("Configuration file {} not found, using environment", path.display());
        Config::from_env()
    }
}

async fn export_grants(config: &Config, args: &ExportArgs) -> Result<(), HubError> {
    let rbac = RbacSystem::new();
    modules::register_all(&rbac, config.acl()).await?;
    info!("Exporting {} roles", rbac.roles().len());
    println!("{}", rbac.export(args.by, args.format)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_config(&cli.config).await {
        Ok(config) => match cli.command.unwrap_or(Command::Serve) {
            Command::Serve => server::run_server(config).await,
            Command::Grants(GrantsCommand::Export(args)) => export_grants(&config, &args).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, to keep multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
