use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use nginx_mesh_config::adapter::{ManifestConfig, mesh_model_config};
use nginx_mesh_config::config::{AdapterConfig, log_file};
use nginx_mesh_config::defaults::{AdapterDefaults, requested_version, resolve_with_timeout};
use nginx_mesh_config::logging;
use nginx_mesh_config::version::clients::{GitHubTree, HelmRepository};
use nginx_mesh_config::version::resolver::ChartVersionResolver;

#[derive(Parser)]
#[command(name = "nginx-mesh-config")]
#[command(version, about = "Build-time configuration for the NGINX Service Mesh adapter")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to the default log file in the data directory
    #[arg(long, global = true)]
    log: bool,

    /// Write JSON logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the latest chart and print the adapter defaults (default)
    Resolve,
    /// Print the catalog registration metadata
    Catalog,
    /// Extract CRD components from a manifest file
    Crds {
        /// Multi-document YAML manifest
        #[arg(long)]
        file: PathBuf,
        /// Mesh version to record; the resolved default is used when omitted
        #[arg(long)]
        mesh_version: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = log_file(cli.log_file, cli.log);
    let _guard = logging::init(log_file.as_deref())?;

    let config = AdapterConfig::load(cli.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command.unwrap_or(Command::Resolve) {
        Command::Resolve => {
            let defaults = runtime.block_on(startup_defaults(&config));
            print_json(&defaults)
        }
        Command::Catalog => print_json(&mesh_model_config()),
        Command::Crds { file, mesh_version } => {
            let manifest = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read manifest {}", file.display()))?;

            let requested = mesh_version.as_deref();
            let defaults = match requested_version(requested) {
                Some(_) => AdapterDefaults::unresolved(&working_dir()),
                None => runtime.block_on(startup_defaults(&config)),
            };

            let manifest_config =
                ManifestConfig::new(defaults.effective_version(requested).map(str::to_string));
            let components = manifest_config.components(&manifest)?;
            info!(
                "Extracted {} components from {}",
                components.len(),
                file.display()
            );

            print_json(&json!({
                "name": manifest_config.name,
                "meshVersion": manifest_config.mesh_version,
                "components": components,
            }))
        }
    }
}

async fn startup_defaults(config: &AdapterConfig) -> AdapterDefaults {
    let tree = GitHubTree::new(&config.source.api_url).with_token(config.source.token.clone());
    let resolver = ChartVersionResolver::new(Arc::new(tree), Arc::new(HelmRepository::new()));

    let outcome = resolve_with_timeout(&resolver, config).await;

    AdapterDefaults::from_outcome(outcome, &working_dir())
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
