//! SEOForge - SEO article generation and editing CLI
//!
//! Main entry point for the SEOForge application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use seoforge::cli::{Cli, Commands};
use seoforge::commands;
use seoforge::commands::quick::QuickOptions;
use seoforge::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::New => {
            commands::new::run_new(config).await?;
            Ok(())
        }
        Commands::Quick {
            topic,
            length,
            keywords,
            tone,
            paraphrase,
        } => {
            tracing::info!("Starting quick generation for '{}'", topic);
            commands::quick::run_quick(
                config,
                QuickOptions {
                    topic,
                    length,
                    keywords,
                    tone,
                    paraphrase,
                },
            )
            .await?;
            Ok(())
        }
        Commands::List => {
            commands::articles::run_list(config).await?;
            Ok(())
        }
        Commands::Show { slug } => {
            commands::articles::run_show(config, &slug).await?;
            Ok(())
        }
        Commands::Edit { slug } => {
            tracing::info!("Opening editor for '{}'", slug);
            commands::edit::run_edit(config, &slug).await?;
            Ok(())
        }
        Commands::Delete { slug } => {
            commands::articles::run_delete(config, &slug).await?;
            Ok(())
        }
        Commands::Analyze { slug, keywords } => {
            commands::analyze::run_analyze(config, &slug, keywords).await?;
            Ok(())
        }
        Commands::Export { slug, output } => {
            commands::export::run_export(config, &slug, output).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "seoforge=debug" } else { "seoforge=info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
