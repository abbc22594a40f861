use crate::{BayesianNetworkError, BifNetworkError, CpdTableError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, converting or writing XMLBIF networks.
///
/// Every error aborts the whole operation: the reader never returns a partially
/// extracted network.
#[derive(Error, Debug)]
pub enum XmlBifError {
    /// Exactly one of a path or an XML string must be given to the reader.
    #[error("Exactly one XMLBIF source must be given (path given: `{path}`, string given: `{string}`)")]
    InvalidSource { path: bool, string: bool },
    #[error("Cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed, or misses a required element
    /// (`NETWORK`, `NAME` of a `VARIABLE`, `FOR` of a `DEFINITION`).
    #[error("Malformed XMLBIF document: {0}")]
    MalformedDocument(String),
    #[error("Variable `{variable}` is not declared in the network")]
    UnknownVariable { variable: String },
    #[error("(Variable `{variable}`) Table entry `{value}` is not a floating-point number")]
    InvalidTableValue { variable: String, value: String },
    #[error("(Variable `{variable}`) {source}")]
    Table {
        variable: String,
        #[source]
        source: CpdTableError,
    },
    #[error("Network is not structurally consistent: {}", format_issues(.0))]
    Invalid(Vec<BifNetworkError>),
    #[error("Cannot emit XMLBIF document: {0}")]
    Emit(String),
    #[error("Unsupported output encoding `{0}`")]
    UnsupportedEncoding(String),
    #[error(transparent)]
    Model(#[from] BayesianNetworkError),
    #[error("Invalid JSON network: {0}")]
    Json(String),
}

fn format_issues(issues: &[BifNetworkError]) -> String {
    issues
        .iter()
        .map(|it| it.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
