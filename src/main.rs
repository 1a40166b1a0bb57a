use anyhow::Result;
use clap::Parser;
use pdfcutter::cli::{Cli, Commands};
use pdfcutter::{commands, contact, mcp, split};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results and the MCP stdio transport
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.global.config();
    tracing::debug!(service_url = %config.service_url, "starting");

    match cli.command {
        Commands::Mcp => {
            tracing::info!("Starting MCP server v{}", env!("CARGO_PKG_VERSION"));
            let service = commands::connect(&config)?;
            mcp::run_server(service, config).await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path, &config).await?;
        }
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            commands::extract::run(&path, &pages, output.as_ref(), &config).await?;
        }
        Commands::Reorder {
            path,
            order,
            moves,
            reverse,
            output,
        } => {
            let options = commands::reorder::ReorderOptions {
                order: order.as_deref(),
                moves: &moves,
                reverse,
            };
            commands::reorder::run(&path, &options, output.as_ref(), &config).await?;
        }
        Commands::Split {
            path,
            split_type,
            start,
            end,
            pages,
            output_dir,
        } => {
            let mode = split::SplitMode::from_inputs(split_type, start, end, pages.as_deref())?;
            commands::split::run(&path, mode, output_dir.as_deref(), &config).await?;
        }
        Commands::Merge { inputs, output } => {
            commands::merge::run(&inputs, output.as_ref(), &config).await?;
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = contact::ContactForm::new(&name, &email, &subject, &message)?;
            commands::contact::run(form, &config).await?;
        }
        Commands::Consent { action } => {
            commands::consent::run(action, &config)?;
        }
    }

    Ok(())
}
