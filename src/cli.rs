use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "inseki")]
#[command(author, version, about = "Find known directory layouts anywhere in a filesystem tree")]
#[command(long_about = "Detects where directory-layout templates (JSON trees of name \
    patterns) are instantiated below a root directory.\n\n\
    Exit codes:\n  \
    0 - Scan completed (with or without matches)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Path to configuration file
    #[arg(long, global = true, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect template instances below a directory
    Scan(ScanArgs),

    /// List the loaded templates
    Templates(TemplatesArgs),

    /// Turn an existing directory into a template
    Capture(CaptureArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory to scan (`~` is expanded)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Template directory (overrides config)
    #[arg(long)]
    pub structures: Option<PathBuf>,

    /// Ignore list file (overrides config)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Verification workers, 0 for one per CPU (overrides config)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Template directory (overrides config)
    #[arg(long)]
    pub structures: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CaptureArgs {
    /// Directory to capture
    pub dir: PathBuf,

    /// Write the template to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pattern given to the template root
    #[arg(long, default_value = "*")]
    pub root_pattern: String,

    /// Maximum depth captured below the root
    #[arg(long)]
    pub depth: Option<usize>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
