use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "issue-summoner")]
#[command(version, about = "Turn actionable comments into issues", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Scan source files for actionable comments
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Annotation to search for (overrides the config, default "@TODO")
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Path to the ignore file (defaults to <path>/.gitignore)
    #[arg(short = 'g', long = "gitignore-path")]
    pub gitignore_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (if not specified, writes to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table output for terminal
    Terminal,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
    /// JSON array of issue title/body payloads
    Issues,
}
