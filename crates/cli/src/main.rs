use std::sync::Arc;

use anyhow::Context;
use catalog_db::MemoryStore;
use catalog_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Operate the books and pets catalog services
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,
    /// Print the resolved settings as JSON
    CheckConfig,
    /// Print the merged OpenAPI document
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    match cli.command {
        Command::Serve => {
            catalog_telemetry::init(&settings.telemetry)?;
            catalog_app::app::serve(&settings).await
        }
        Command::CheckConfig => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Openapi => {
            let registry = catalog_app::app::build_registry(Arc::new(MemoryStore::new()));
            let document = catalog_http::router::openapi_document(&registry);
            let rendered =
                serde_json::to_string_pretty(&document).context("failed to render OpenAPI")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
