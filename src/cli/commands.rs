//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blog feed pagination CLI
#[derive(Parser, Debug)]
#[command(name = "jetpager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Blog host, overrides the config file
    #[arg(long, global = true)]
    pub site_url: Option<String>,

    /// URL of the page being rendered (supplies `page` and `max-results`)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Label to scope the listing to (without a config file)
    #[arg(short, long, global = true)]
    pub label: Option<String>,

    /// Posts per page (without a config file)
    #[arg(short, long, global = true)]
    pub posts: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a page window; malformed numbers fall back to defaults
    Window {
        /// Total number of items
        total: String,

        /// Requested page
        page: String,

        /// Items per page
        page_size: String,

        /// Page-number controls shown at once
        #[arg(short, long, default_value = "5")]
        window: String,
    },

    /// Fetch counts and print the controls of every pager
    Load {
        /// Only load this container
        #[arg(long)]
        container: Option<String>,
    },

    /// Load a pager and select one of its pages
    Select {
        /// Page to select
        page: u32,

        /// Container to use (defaults to the first one)
        #[arg(long)]
        container: Option<String>,
    },

    /// Load custom post lists
    Posts {
        /// Only load this list
        #[arg(long)]
        list: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_command() {
        let cli = Cli::try_parse_from(["jetpager", "window", "97", "5", "10", "-w", "7"]).unwrap();
        match cli.command {
            Commands::Window {
                total,
                page,
                page_size,
                window,
            } => {
                assert_eq!(
                    (total.as_str(), page.as_str(), page_size.as_str(), window.as_str()),
                    ("97", "5", "10", "7")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jetpager",
            "select",
            "3",
            "--site-url",
            "example.blogspot.com",
            "--label",
            "Rust",
            "--format",
            "pretty",
            "--verbose",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Select { page: 3, .. }));
        assert_eq!(cli.site_url.as_deref(), Some("example.blogspot.com"));
        assert_eq!(cli.label.as_deref(), Some("Rust"));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(cli.verbose);
    }
}
