mod cli;
mod exec;
mod style;

use std::io;
use std::path::Path;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use devfolio::logging::{self, LogTarget};
use devfolio::UiOptions;
use devfolio_core::attribution::{AttributionStore, UtmParameters};
use devfolio_core::config::AppConfig;
use devfolio_core::content::Portfolio;
use tracing::info;

use crate::cli::{Cli, Command};

const DEFAULT_CONFIG: &str = "devfolio.toml";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Ui);
    if let Command::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "devfolio", &mut io::stdout());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_optional(Path::new(DEFAULT_CONFIG))?.unwrap_or_default(),
    };
    let portfolio = match &cli.content {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::builtin().context("built-in portfolio content")?,
    };
    let level = if cli.dev_mode {
        "debug"
    } else {
        config.log.level.as_str()
    };

    match command {
        Command::Exec { lines, plain } => {
            logging::init(level, LogTarget::Stderr)?;
            session_attribution(cli.utm.as_deref());
            let stdout = io::stdout();
            exec::run(&portfolio, &config.terminal, &lines, plain, &mut stdout.lock())
        }
        Command::Ui | Command::Completions { .. } => {
            let target = match cli.log_file.clone().or_else(|| config.log.file.clone()) {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Disabled,
            };
            logging::init(level, target)?;
            let attribution = session_attribution(cli.utm.as_deref());
            devfolio::run_ui(UiOptions {
                portfolio,
                config,
                attribution,
            })
        }
    }
}

fn session_attribution(query: Option<&str>) -> UtmParameters {
    let attribution = AttributionStore::session_default().resolve_query(query);
    if !attribution.is_empty() {
        let pairs = attribution
            .pairs()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(attribution = %pairs, "session attribution");
    }
    attribution
}
