use crate::serde::xml::{XmlDefinition, XmlVariable};
use serde::Deserialize;

/// An intermediate structure purely for deserializing XMLBIF documents.
///
/// The root `BIF` element must contain a `NETWORK`. The format version is optional
/// and only kept for completeness.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename = "BIF")]
pub(crate) struct XmlBif {
    #[serde(default, rename = "@VERSION", alias = "@version")]
    pub version: Option<String>,
    #[serde(rename = "NETWORK")]
    pub network: XmlNetwork,
}

/// Structure to deserialize the `NETWORK` element.
///
/// The network name is optional. Variables and definitions keep their document order,
/// and both lists can be empty (consistency of the network is checked later).
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct XmlNetwork {
    #[serde(default, rename = "NAME")]
    pub name: Option<String>,
    #[serde(default, rename = "VARIABLE")]
    pub variables: Vec<XmlVariable>,
    #[serde(default, rename = "DEFINITION")]
    pub definitions: Vec<XmlDefinition>,
}
