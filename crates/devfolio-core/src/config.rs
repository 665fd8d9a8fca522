//! Application configuration (`devfolio.toml`).

#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::FolioError;
use crate::navigation::CyclePolicy;

pub const MIN_TERMINAL_HEIGHT: u16 = 6;
pub const MAX_TERMINAL_HEIGHT: u16 = 30;
const MAX_NAVIGATION_DELAY_MS: u64 = 5_000;
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub terminal: TerminalConfig,
    pub navigation: NavigationConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub user: String,
    pub host: String,
    pub cwd: String,
    pub home: String,
    pub open: bool,
    pub height: u16,
    pub navigation_delay: Duration,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "dev".to_string(),
            host: "portfolio".to_string(),
            cwd: "~/portfolio".to_string(),
            home: "/home/dev/portfolio".to_string(),
            open: true,
            height: 12,
            navigation_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationConfig {
    pub cycle: CyclePolicy,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: SmolStr,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: SmolStr::new("info"),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| FolioError::io(path, err))?;
        let raw: ConfigToml = toml::from_str(&text).map_err(|err| {
            FolioError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        raw.into_config().map_err(|err| match err {
            FolioError::InvalidConfig(message) => {
                FolioError::InvalidConfig(format!("{}: {message}", path.display()).into())
            }
            other => other,
        })
    }

    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>, FolioError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn from_toml(text: &str) -> Result<Self, FolioError> {
        let raw: ConfigToml =
            toml::from_str(text).map_err(|err| FolioError::InvalidConfig(err.to_string().into()))?;
        raw.into_config()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    terminal: TerminalToml,
    #[serde(default)]
    navigation: NavigationToml,
    #[serde(default)]
    log: LogToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TerminalToml {
    user: Option<String>,
    host: Option<String>,
    cwd: Option<String>,
    home: Option<String>,
    open: Option<bool>,
    height: Option<u16>,
    navigation_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct NavigationToml {
    cycle: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogToml {
    level: Option<String>,
    file: Option<PathBuf>,
}

impl ConfigToml {
    fn into_config(self) -> Result<AppConfig, FolioError> {
        let defaults = TerminalConfig::default();
        let terminal = TerminalConfig {
            user: non_empty("terminal.user", self.terminal.user)?.unwrap_or(defaults.user),
            host: non_empty("terminal.host", self.terminal.host)?.unwrap_or(defaults.host),
            cwd: non_empty("terminal.cwd", self.terminal.cwd)?.unwrap_or(defaults.cwd),
            home: non_empty("terminal.home", self.terminal.home)?.unwrap_or(defaults.home),
            open: self.terminal.open.unwrap_or(defaults.open),
            height: match self.terminal.height {
                Some(height) if !(MIN_TERMINAL_HEIGHT..=MAX_TERMINAL_HEIGHT).contains(&height) => {
                    return Err(FolioError::InvalidConfig(
                        format!(
                            "terminal.height {height} out of range ({MIN_TERMINAL_HEIGHT}..={MAX_TERMINAL_HEIGHT})"
                        )
                        .into(),
                    ))
                }
                Some(height) => height,
                None => defaults.height,
            },
            navigation_delay: match self.terminal.navigation_delay_ms {
                Some(ms) if ms > MAX_NAVIGATION_DELAY_MS => {
                    return Err(FolioError::InvalidConfig(
                        format!(
                            "terminal.navigation_delay_ms {ms} exceeds {MAX_NAVIGATION_DELAY_MS}"
                        )
                        .into(),
                    ))
                }
                Some(ms) => Duration::from_millis(ms),
                None => defaults.navigation_delay,
            },
        };
        let navigation = NavigationConfig {
            cycle: match self.navigation.cycle.as_deref() {
                Some(text) => CyclePolicy::parse(text)?,
                None => CyclePolicy::default(),
            },
        };
        let level = match self.log.level {
            Some(level) => {
                let normalized = level.trim().to_ascii_lowercase();
                if !LOG_LEVELS.contains(&normalized.as_str()) {
                    return Err(FolioError::InvalidConfig(
                        format!("invalid log.level '{level}'").into(),
                    ));
                }
                SmolStr::new(normalized)
            }
            None => LogConfig::default().level,
        };
        Ok(AppConfig {
            terminal,
            navigation,
            log: LogConfig {
                level,
                file: self.log.file,
            },
        })
    }
}

fn non_empty(key: &str, value: Option<String>) -> Result<Option<String>, FolioError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(FolioError::InvalidConfig(
            format!("{key} must not be empty").into(),
        )),
        other => Ok(other),
    }
}
