use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Find text in PDF documents and stamp replacement text over it.
#[derive(Debug, Parser)]
#[command(name = "readdress", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search for text and print every match with its bounding box
    Search {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Text to search for (matching ignores case, dashes, and spacing)
        #[arg(value_name = "QUERY")]
        query: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Find text and stamp replacement text over every occurrence
    Replace {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Text to search for; defaults to the saved configuration
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Replacement text (may contain line breaks); defaults to the
        /// saved configuration
        #[arg(long)]
        text: Option<String>,

        /// Output file. Default: updated_<input-name> next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not persist this run's configuration
        #[arg(long)]
        no_save: bool,
    },

    /// Cover a manually selected region and stamp replacement text
    Mask {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page the selection was drawn on (1-based)
        #[arg(long)]
        page: usize,

        /// Selection left edge in display pixels (top-left origin)
        #[arg(long)]
        x: f64,

        /// Selection top edge in display pixels (top-left origin)
        #[arg(long)]
        y: f64,

        /// Selection width in display pixels
        #[arg(long)]
        width: f64,

        /// Selection height in display pixels
        #[arg(long)]
        height: f64,

        /// Display scale the selection was drawn at
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        /// Replacement text (may contain line breaks); defaults to the
        /// saved configuration
        #[arg(long)]
        text: Option<String>,

        /// Output file. Default: updated_<input-name> next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not persist this run's configuration
        #[arg(long)]
        no_save: bool,
    },

    /// Translate every page by a fixed offset
    Shift {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Horizontal offset in document units
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dx: f64,

        /// Vertical offset in document units
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dy: f64,

        /// Output file. Default: updated_<input-name> next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print each page's raw extracted text (for troubleshooting matches)
    Dump {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show or clear the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions on the persisted configuration record.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the saved configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Delete the saved configuration
    Clear,
}

/// Output format for search/dump subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated for search)
    Text,
    /// JSON output
    Json,
}
