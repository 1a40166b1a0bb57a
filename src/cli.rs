use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS};
use crate::split::SplitType;

#[derive(Parser)]
#[command(name = "pdfcutter")]
#[command(about = "Client for the pdfcutter web service: extract, reorder, split and merge PDFs")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Base URL of the PDF service
    #[arg(long, global = true, env = "PDFCUTTER_URL", default_value = DEFAULT_SERVICE_URL)]
    pub service_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "PDFCUTTER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Consent record location (defaults to the user data directory)
    #[arg(long, global = true, env = "PDFCUTTER_CONSENT_FILE")]
    pub consent_file: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn config(&self) -> Config {
        Config {
            service_url: self.service_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            consent_file: self.consent_file.clone(),
            ..Config::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Show the page count the service reports for a PDF
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Extract selected pages into a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages to keep (e.g., "1-5,10,15-end")
        pages: String,

        /// Download the result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Change the order of pages
    Reorder {
        /// PDF file to reorder
        path: PathBuf,

        /// Complete new order as 1-based page numbers (e.g., "3,1,2")
        #[arg(long, conflicts_with_all = ["moves", "reverse"])]
        order: Option<String>,

        /// Move the page at one 1-based position to another (e.g., "1:4");
        /// may be repeated
        #[arg(long = "move", value_name = "FROM:TO")]
        moves: Vec<String>,

        /// Reverse the order after applying moves
        #[arg(long)]
        reverse: bool,

        /// Download the result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a PDF into one file per page
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Which pages to split out
        #[arg(long = "type", value_enum, default_value_t = SplitType::All)]
        split_type: SplitType,

        /// First page (for --type range)
        #[arg(long)]
        start: Option<u32>,

        /// Last page (for --type range)
        #[arg(long)]
        end: Option<u32>,

        /// Page list (for --type specific, e.g., "1-3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Download the produced files into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Download the result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        message: String,
    },

    /// Inspect or record cookie consent
    Consent {
        #[command(subcommand)]
        action: ConsentAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConsentAction {
    /// Print the stored decision
    Show,
    /// Allow analytics and ads
    AcceptAll,
    /// Allow only what the site needs to work
    NecessaryOnly,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_reorder_order_conflicts_with_moves() {
        let result = Cli::try_parse_from([
            "pdfcutter", "reorder", "a.pdf", "--order", "2,1", "--move", "1:2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_args() {
        let cli = Cli::try_parse_from([
            "pdfcutter", "split", "a.pdf", "--type", "range", "--start", "2", "--end", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Split {
                split_type,
                start,
                end,
                ..
            } => {
                assert_eq!(split_type, SplitType::Range);
                assert_eq!((start, end), (Some(2), Some(4)));
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_global_config() {
        let cli = Cli::try_parse_from([
            "pdfcutter",
            "info",
            "a.pdf",
            "--service-url",
            "http://pdf.local:8080",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let config = cli.global.config();
        assert_eq!(config.service_url, "http://pdf.local:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_files_per_request, 10);
    }
}
