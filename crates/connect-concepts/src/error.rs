#![deny(unsafe_code)]

use std::path::PathBuf;

use connect_model::ConceptId;

/// Errors raised by the concept mapping registry.
///
/// Every variant is a configuration defect: the mapping file is wrong, or
/// code asked for a symbolic name the mapping does not define. None of them
/// are transient, so callers should surface them rather than retry.
#[derive(Debug, thiserror::Error)]
pub enum ConceptError {
    #[error("unknown concept field: {name}")]
    UnknownField { name: String },

    #[error("'{name}' is a concept group without its own concept id")]
    NotAField { name: String },

    #[error("'{name}' is not a concept group")]
    NotAGroup { name: String },

    #[error("failed to read concept map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse concept map {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid concept map header: {message}")]
    InvalidSchema { message: String },

    #[error("concept id {id} is assigned to both '{first}' and '{second}'")]
    DuplicateConceptId {
        id: ConceptId,
        first: String,
        second: String,
    },

    #[error("'{name}' is defined both as a field and as a concept group")]
    DuplicateName { name: String },

    #[error("invalid alias '{alias}': {message}")]
    InvalidAlias { alias: String, message: String },

    #[error("invalid label code '{code}'")]
    InvalidLabelCode { code: String },
}

impl ConceptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}
