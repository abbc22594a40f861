use serde::Deserialize;

/// Structure to deserialize XMLBIF info about a probability definition.
///
/// Every definition must name its variable (`FOR`). The `GIVEN` list is kept in
/// document order here, the reversal happens when building the network. The table is
/// kept as raw text, since its shape depends on the variable states.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct XmlDefinition {
    #[serde(rename = "FOR")]
    pub target: String,
    #[serde(default, rename = "GIVEN")]
    pub given: Vec<String>,
    #[serde(default, rename = "TABLE")]
    pub table: Option<String>,
}
