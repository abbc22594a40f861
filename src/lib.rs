//! Rust library for reading and writing Bayesian networks in the XMLBIF format.
//!
//! The [`XmlBifReader`] extracts a [`BifNetwork`] (variables, states, parents, probability
//! tables and properties) from an XMLBIF document, and can build a [`BayesianNetwork`]
//! from it. The [`XmlBifWriter`] serializes a [`BifNetwork`] back into canonical XMLBIF.

/// The Bayesian network built from extracted data.
mod bayesian;
mod error;
/// The intermediate network representation shared by the reader and the writer.
mod model;
mod reader;
/// Structures for deserializing XMLBIF documents.
mod serde;
mod utils;
/// Validation framework for checking structural consistency.
mod validation;
mod writer;

pub use bayesian::{BayesianNetwork, BayesianNetworkError, TabularCpd};
pub use error::XmlBifError;
pub use model::{BifNetwork, BifNetworkError, CpdTable, CpdTableError};
pub use reader::XmlBifReader;
pub use validation::{ErrorReporter, Validation, VecReporter};
pub use writer::{WriterConfig, XmlBifWriter, XmlElement, XmlEncoding};
