use serde::Deserialize;

/// Structure to deserialize XMLBIF info about a variable.
///
/// Every variable must have a name. Outcomes and properties are optional lists. The
/// `TYPE` attribute is usually `nature`, but we do not interpret it.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct XmlVariable {
    #[serde(default, rename = "@TYPE", alias = "@type")]
    pub r#type: Option<String>,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(default, rename = "OUTCOME")]
    pub outcomes: Vec<String>,
    #[serde(default, rename = "PROPERTY")]
    pub properties: Vec<String>,
}
