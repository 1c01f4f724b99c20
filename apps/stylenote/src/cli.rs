//! CLI argument parsing via `clap`.

use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stylenote",
    version,
    about = "Lint chapter notes against readable-code style rules",
    long_about = "stylenote — check a directory of chapter notes and code snippets against a fixed set of readability rules.\n\nConfiguration precedence: CLI > stylenote.toml > defaults.\nExit codes: 0 no findings, 1 findings, 2 fatal error.",
    after_help = "Examples:\n  stylenote book/\n  stylenote book/ --rules ambiguous-boolean,long-line\n  stylenote book/ --format json\n  stylenote --list-rules",
    arg_required_else_help = true
)]
/// Top-level CLI options.
pub struct Cli {
    /// Root directory (or single file) of chapter notes
    #[arg(required_unless_present = "list_rules")]
    pub root: Option<PathBuf>,
    #[arg(long, help = "Comma-separated rule names to run (default: all)")]
    pub rules: Option<String>,
    #[arg(long, value_enum, help = "Output mode: text|json (default: text)")]
    pub format: Option<OutputFormat>,
    #[arg(long, help = "Path to stylenote.toml (default: discovered from root)")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Worker threads for checking documents")]
    pub jobs: Option<usize>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "List available rules and exit")]
    pub list_rules: bool,
}
