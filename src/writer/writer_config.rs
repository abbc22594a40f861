use crate::XmlBifError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Text encoding of the serialized XMLBIF document.
///
/// With [`XmlEncoding::Ascii`], every non-ASCII character in text and attribute values is
/// written as a numeric character reference, so the output is valid in both encodings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum XmlEncoding {
    #[default]
    Utf8,
    Ascii,
}

impl XmlEncoding {
    /// The canonical name used in the XML declaration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            XmlEncoding::Utf8 => "UTF-8",
            XmlEncoding::Ascii => "US-ASCII",
        }
    }
}

impl Display for XmlEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for XmlEncoding {
    type Err = XmlBifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(XmlEncoding::Utf8),
            "us-ascii" | "ascii" => Ok(XmlEncoding::Ascii),
            _ => Err(XmlBifError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for XmlEncoding {
    type Error = XmlBifError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<XmlEncoding> for String {
    fn from(value: XmlEncoding) -> Self {
        value.name().to_string()
    }
}

/// Configuration of [`crate::XmlBifWriter`] output.
///
/// Missing fields take their default values when deserialized, so the configuration
/// can be embedded into larger configuration files.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WriterConfig {
    pub encoding: XmlEncoding,
    /// Put nested elements on separate lines, indented by two spaces per level.
    pub pretty_print: bool,
    /// Start the document with an `<?xml ...?>` declaration naming the encoding.
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            encoding: XmlEncoding::Utf8,
            pretty_print: true,
            xml_declaration: false,
        }
    }
}

impl WriterConfig {
    /// Configuration without any injected whitespace.
    #[must_use]
    pub fn compact() -> Self {
        WriterConfig {
            pretty_print: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{WriterConfig, XmlBifError, XmlEncoding};

    #[test]
    fn encoding_names_are_case_insensitive() {
        assert_eq!("UTF-8".parse::<XmlEncoding>().unwrap(), XmlEncoding::Utf8);
        assert_eq!("utf8".parse::<XmlEncoding>().unwrap(), XmlEncoding::Utf8);
        assert_eq!("us-ascii".parse::<XmlEncoding>().unwrap(), XmlEncoding::Ascii);
        assert!(matches!(
            "latin-1".parse::<XmlEncoding>(),
            Err(XmlBifError::UnsupportedEncoding(name)) if name == "latin-1"
        ));
    }

    #[test]
    fn config_fields_have_defaults() {
        let config: WriterConfig = serde_json::from_str(r#"{ "encoding": "ascii" }"#).unwrap();
        assert_eq!(config.encoding, XmlEncoding::Ascii);
        assert!(config.pretty_print);
        assert!(!config.xml_declaration);

        let json = serde_json::to_string(&WriterConfig::compact()).unwrap();
        assert_eq!(
            json,
            r#"{"encoding":"UTF-8","pretty_print":false,"xml_declaration":false}"#
        );
        assert!(serde_json::from_str::<WriterConfig>(r#"{ "encoding": "ebcdic" }"#).is_err());
    }
}
