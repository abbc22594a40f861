use crate::{BifNetwork, XmlBifError};

impl BifNetwork {
    /// Convert the `BifNetwork` into a JSON string.
    pub fn to_json_string(&self) -> Result<String, XmlBifError> {
        serde_json::to_string(self).map_err(|e| XmlBifError::Json(e.to_string()))
    }

    /// Same as [`BifNetwork::to_json_string`], but using a human-readable JSON formatting.
    pub fn to_json_string_pretty(&self) -> Result<String, XmlBifError> {
        serde_json::to_string_pretty(self).map_err(|e| XmlBifError::Json(e.to_string()))
    }

    /// Create a new network from a JSON string produced by [`BifNetwork::to_json_string`].
    ///
    /// The result is not validated.
    pub fn from_json_str(json_str: &str) -> Result<Self, XmlBifError> {
        serde_json::from_str(json_str).map_err(|e| XmlBifError::Json(e.to_string()))
    }
}
