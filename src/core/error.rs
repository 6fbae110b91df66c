use std::path::PathBuf;

use thiserror::Error;

use super::types::{FileFormat, FileId};

/// Errors that can occur while assembling or exporting a batch file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// Transaction groups of one file declare different wire formats.
    #[error("creditors with mismatching file formats cannot be mixed in same file: {}", format_list(.formats))]
    MixedFileFormat {
        /// The distinct formats found, in sorted order.
        formats: Vec<FileFormat>,
    },

    /// The requested batch file does not exist.
    #[error("batch file {0} not found")]
    FileNotFound(FileId),

    /// The persistence collaborator failed.
    #[error("store error: {0}")]
    Store(String),

    /// The template collaborator failed.
    #[error("template error: {0}")]
    Template(String),

    /// XML generation or parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Writing the output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file name would escape the output directory.
    #[error("invalid output file name '{0}'")]
    InvalidOutputName(String),

    /// Transport failure talking to a remote service.
    #[error("network error: {0}")]
    Network(String),
}

impl SepaError {
    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MixedFileFormat { .. } => "MIXED_FILE_FORMAT",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::Store(_) => "STORE",
            Self::Template(_) => "TEMPLATE",
            Self::Xml(_) => "XML",
            Self::Io { .. } => "IO",
            Self::InvalidOutputName(_) => "INVALID_OUTPUT_NAME",
            Self::Network(_) => "NETWORK",
        }
    }
}

fn format_list(formats: &[FileFormat]) -> String {
    formats
        .iter()
        .map(FileFormat::code)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierErrorKind {
    InvalidIban,
    InvalidBic,
}

impl IdentifierErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIban => "INVALID_IBAN",
            Self::InvalidBic => "INVALID_BIC",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::InvalidIban => "IBAN is not correct",
            Self::InvalidBic => "BIC is not correct",
        }
    }
}

/// Returned when an IBAN or BIC candidate is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierError {
    pub kind: IdentifierErrorKind,
    /// The rejected input.
    pub value: String,
}

impl IdentifierError {
    pub(crate) fn iban(value: &str) -> Self {
        Self {
            kind: IdentifierErrorKind::InvalidIban,
            value: value.into(),
        }
    }

    pub(crate) fn bic(value: &str) -> Self {
        Self {
            kind: IdentifierErrorKind::InvalidBic,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}'", self.kind.message(), self.value)
    }
}

impl std::error::Error for IdentifierError {}
