use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::harness::Algorithm;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{algorithm} returned an unsorted sequence (n={size}, trial {trial})")]
    NotSorted {
        algorithm: Algorithm,
        size: usize,
        trial: usize,
    },

    #[error("could not draw chart: {0}")]
    Chart(String),

    #[error("invalid PNG: {0}")]
    InvalidPng(&'static str),

    #[error("unsupported PNG: {0}")]
    UnsupportedPng(String),

    #[error("could not serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}
