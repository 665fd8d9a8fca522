//! Error type shared by the content, configuration and attribution loaders.

use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("invalid portfolio content: {0}")]
    InvalidContent(SmolStr),
    #[error("invalid configuration: {0}")]
    InvalidConfig(SmolStr),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("attribution store: {0}")]
    Attribution(SmolStr),
}

impl FolioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
