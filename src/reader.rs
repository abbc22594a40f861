use crate::serde::xml::XmlBif;
use crate::{BayesianNetwork, BifNetwork, CpdTable, XmlBifError};
use indexmap::IndexMap;
use log::debug;
use serde_xml_rs::SerdeXml;
use std::path::Path;

/// Reader of Bayesian networks in the XMLBIF format.
///
/// The whole document is parsed and extracted when the reader is created. All accessor
/// methods only borrow the extracted [`BifNetwork`], so they never fail and never parse
/// the document again.
///
/// ```
/// use biodivine_lib_io_xmlbif::XmlBifReader;
///
/// let xml = r#"
/// <BIF VERSION="0.3">
///   <NETWORK>
///     <NAME>Example</NAME>
///     <VARIABLE TYPE="nature">
///       <NAME>rain</NAME>
///       <OUTCOME>yes</OUTCOME>
///       <OUTCOME>no</OUTCOME>
///     </VARIABLE>
///     <DEFINITION>
///       <FOR>rain</FOR>
///       <TABLE>0.2 0.8</TABLE>
///     </DEFINITION>
///   </NETWORK>
/// </BIF>"#;
/// let reader = XmlBifReader::from_xml_str(xml).unwrap();
/// assert_eq!(reader.variables(), ["rain"]);
/// assert_eq!(reader.cpd()["rain"].to_rows(), vec![vec![0.2], vec![0.8]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct XmlBifReader {
    network: BifNetwork,
}

impl XmlBifReader {
    /// Create a reader from exactly one of a file `path` or an XML `string`.
    ///
    /// Returns [`XmlBifError::InvalidSource`] if neither or both are given.
    pub fn new(path: Option<&Path>, string: Option<&str>) -> Result<Self, XmlBifError> {
        match (path, string) {
            (Some(path), None) => Self::from_path(path),
            (None, Some(string)) => Self::from_xml_str(string),
            (path, string) => Err(XmlBifError::InvalidSource {
                path: path.is_some(),
                string: string.is_some(),
            }),
        }
    }

    /// Read and parse an XMLBIF file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, XmlBifError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading XMLBIF file");
        let xml_str = std::fs::read_to_string(path).map_err(|source| XmlBifError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml_str(&xml_str)
    }

    /// Parse an XMLBIF document from a string.
    ///
    /// Internally, we use `serde_xml_rs` deserialization into an intermediate `XmlBif`
    /// structure, which is then converted into a [`BifNetwork`]. Repeated elements do not
    /// have to be adjacent: XMLBIF allows `VARIABLE`, `DEFINITION` and `PROPERTY` elements
    /// (or `OUTCOME` and `PROPERTY` elements of one variable) to interleave, and every list
    /// keeps its document order.
    pub fn from_xml_str(xml_str: &str) -> Result<Self, XmlBifError> {
        let xml_model: XmlBif = SerdeXml::new()
            .overlapping_sequences(true)
            .from_str(xml_str)
            .map_err(|e| XmlBifError::MalformedDocument(e.to_string()))?;
        let network = BifNetwork::try_from(xml_model)?;
        debug!(
            variables = network.variables().len(),
            definitions = network.parents().len(),
            tables = network.cpd().len();
            "Parsed XMLBIF network"
        );
        Ok(XmlBifReader { network })
    }

    /// The network name, if the document declares one.
    #[must_use]
    pub fn network_name(&self) -> Option<&str> {
        self.network.network_name()
    }

    /// Variable names in document order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        self.network.variables()
    }

    /// Ordered outcomes of every variable.
    #[must_use]
    pub fn states(&self) -> &IndexMap<String, Vec<String>> {
        self.network.states()
    }

    /// Parents of every defined variable, in reverse `GIVEN` order.
    #[must_use]
    pub fn parents(&self) -> &IndexMap<String, Vec<String>> {
        self.network.parents()
    }

    #[must_use]
    pub fn edges(&self) -> Vec<(String, String)> {
        self.network.edges()
    }

    /// Probability tables with one row per variable state.
    #[must_use]
    pub fn cpd(&self) -> &IndexMap<String, CpdTable> {
        self.network.cpd()
    }

    /// Ordered properties of every variable (possibly empty).
    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, Vec<String>> {
        self.network.properties()
    }

    #[must_use]
    pub fn network(&self) -> &BifNetwork {
        &self.network
    }

    #[must_use]
    pub fn into_network(self) -> BifNetwork {
        self.network
    }

    /// Build a [`BayesianNetwork`] from the extracted data.
    ///
    /// The network must pass validation first, see [`BayesianNetwork::try_from`].
    pub fn build_model(&self) -> Result<BayesianNetwork, XmlBifError> {
        BayesianNetwork::try_from(&self.network)
    }
}
