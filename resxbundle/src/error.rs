//! All error types for the resxbundle crate.
//!
//! Every per-file failure (reading, extraction, rendering) is returned as an
//! [`Error`]. A locale suffix that cannot be resolved is *not* an error; see
//! [`crate::locale`].

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate resource key `{key}` in {file}")]
    DuplicateKey { key: String, file: String },

    #[error("resource `{key}` has type `{type_name}` which cannot be resolved without a type resolver")]
    UnresolvableType { key: String, type_name: String },

    #[error("cannot read resource file {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("unknown output mode `{0}`")]
    UnknownMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} resource files failed to compile")]
    Batch { failed: usize, total: usize },
}

impl Error {
    /// Wraps a read or parse failure for `path` as an unreadable-source error.
    pub fn unreadable(
        path: impl AsRef<Path>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::UnreadableSource {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Creates a new duplicate-key error.
    pub fn duplicate_key(key: impl Into<String>, file: impl Into<String>) -> Self {
        Error::DuplicateKey {
            key: key.into(),
            file: file.into(),
        }
    }

    /// Creates a new unresolvable-type error.
    pub fn unresolvable(key: impl Into<String>, type_name: impl Into<String>) -> Self {
        Error::UnresolvableType {
            key: key.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
