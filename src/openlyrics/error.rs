use std::io;

use thiserror::Error;

use super::OPENLYRICS_NAMESPACE;

/// Everything that can stop a song from loading, from the missing asset file
/// up to a document that lacks a title. Asset and parse problems share one
/// type so callers handle them in a single `match`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("asset `{path}` not found")]
    AssetNotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read asset `{path}`")]
    AssetReadFailure {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed XML document: {0}")]
    MalformedDocument(#[source] roxmltree::Error),

    #[error(
        "unexpected root element `{}`, expected `song` in namespace {}",
        display_qualified(.found_name, .found_namespace.as_deref()),
        OPENLYRICS_NAMESPACE
    )]
    UnexpectedRoot {
        found_name: String,
        found_namespace: Option<String>,
    },

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Copyable classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    AssetNotFound,
    AssetReadFailure,
    MalformedDocument,
    UnexpectedRoot,
    MissingRequiredField,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::AssetNotFound { .. } => DecodeErrorKind::AssetNotFound,
            DecodeError::AssetReadFailure { .. } => DecodeErrorKind::AssetReadFailure,
            DecodeError::MalformedDocument(_) => DecodeErrorKind::MalformedDocument,
            DecodeError::UnexpectedRoot { .. } => DecodeErrorKind::UnexpectedRoot,
            DecodeError::MissingRequiredField(_) => DecodeErrorKind::MissingRequiredField,
        }
    }

    /// Classify an I/O failure coming out of an asset source.
    pub(crate) fn from_io(path: &str, source: io::Error) -> Self {
        let path = path.to_string();
        if source.kind() == io::ErrorKind::NotFound {
            DecodeError::AssetNotFound { path, source }
        } else {
            DecodeError::AssetReadFailure { path, source }
        }
    }
}

fn display_qualified(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("{{{ns}}}{name}"),
        None => name.to_string(),
    }
}
