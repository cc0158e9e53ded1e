//! Option table errors.
//!
//! Dialog operations never fail. Reading, writing and checking option
//! table files can, and every file error names the path involved.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A table that cannot be used to translate selector indices
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidTable {
    #[error("option table '{0}' has no labels")]
    Empty(String),

    #[error("option table '{table}' has a blank label at index {index}")]
    BlankLabel { table: String, index: usize },
}

/// Failure reading or writing an option table file
#[derive(Error, Debug)]
pub enum TablesError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Only `.json` and `.toml` files are understood
    #[error("{} is not a .json or .toml file", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} is not valid TOML: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot encode option tables for {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("no configuration directory on {0}")]
    NoConfigDir(&'static str),

    #[error(transparent)]
    Invalid(#[from] InvalidTable),
}

impl TablesError {
    /// The file involved, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            TablesError::Read { path, .. }
            | TablesError::Write { path, .. }
            | TablesError::UnknownFormat { path }
            | TablesError::Json { path, .. }
            | TablesError::Toml { path, .. }
            | TablesError::Encode { path, .. } => Some(path),
            TablesError::NoConfigDir(_) | TablesError::Invalid(_) => None,
        }
    }
}

pub type TablesResult<T> = Result<T, TablesError>;
