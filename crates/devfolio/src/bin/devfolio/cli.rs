use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "devfolio",
    version,
    about = "Personal portfolio in code-editor chrome, right in your terminal"
)]
pub struct Cli {
    /// Portfolio content file (TOML). Defaults to the built-in portfolio.
    #[arg(long, global = true, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Configuration file. Defaults to ./devfolio.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Campaign query string, e.g. "utm_source=github&utm_medium=readme".
    #[arg(long, global = true, value_name = "QUERY")]
    pub utm: Option<String>,

    /// Verbose logging.
    #[arg(long, global = true, default_value_t = false)]
    pub dev_mode: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive portfolio (default).
    Ui,
    /// Run terminal commands without the UI and print their output.
    Exec {
        /// Command lines, run in order.
        #[arg(required = true, value_name = "LINE")]
        lines: Vec<String>,
        /// Print without colors.
        #[arg(long, default_value_t = false)]
        plain: bool,
    },
    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
