use crate::{BifNetwork, Validation, WriterConfig, XmlBifError, XmlElement};
use log::{debug, trace};
use std::fmt::{Display, Formatter};

/// Version written into the `BIF` root element.
const FORMAT_VERSION: &str = "0.3";

/// Writer of Bayesian networks in the XMLBIF format.
///
/// The element tree is built once, when the writer is created. The output is canonical:
/// `VARIABLE` and `DEFINITION` elements are sorted by variable name, `GIVEN` elements are
/// sorted by parent name, while outcomes and properties keep their original order.
///
/// If the network has a probability table for a variable, it is written into the
/// `TABLE` element of its definition, with columns rearranged to match the sorted
/// `GIVEN` order. Reading the output back with [`crate::XmlBifReader`] thus yields the same
/// probability for every parent configuration.
///
/// ```
/// use biodivine_lib_io_xmlbif::{BifNetwork, WriterConfig, XmlBifWriter};
///
/// let mut network = BifNetwork::new(Some("Example"));
/// network.add_variable("rain", &["yes", "no"]);
/// let writer = XmlBifWriter::new(&network, WriterConfig::compact()).unwrap();
/// assert_eq!(
///     writer.to_xml_string().unwrap(),
///     "<BIF version=\"0.3\"><NETWORK><NAME>Example</NAME>\
///      <VARIABLE TYPE=\"nature\"><NAME>rain</NAME><OUTCOME>yes</OUTCOME><OUTCOME>no</OUTCOME></VARIABLE>\
///      <DEFINITION><FOR>rain</FOR></DEFINITION></NETWORK></BIF>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlBifWriter {
    config: WriterConfig,
    network: XmlElement,
}

impl XmlBifWriter {
    /// Build the XMLBIF element tree of the given network.
    ///
    /// Fails with [`XmlBifError::Invalid`] if the network does not pass validation.
    pub fn new(network: &BifNetwork, config: WriterConfig) -> Result<Self, XmlBifError> {
        network.validate().map_err(XmlBifError::Invalid)?;

        let mut xml_network = XmlElement::new("NETWORK");
        if let Some(name) = network.network_name() {
            xml_network.push(XmlElement::with_text("NAME", name));
        }
        add_variables(&mut xml_network, network);
        add_definitions(&mut xml_network, network);
        add_tables(&mut xml_network, network)?;

        debug!(
            variables = network.variables().len(),
            tables = network.cpd().len(),
            pretty_print = config.pretty_print;
            "Built XMLBIF document"
        );
        Ok(XmlBifWriter {
            config,
            network: xml_network,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// The complete document tree: a `BIF` root wrapping the `NETWORK` element.
    #[must_use]
    pub fn root(&self) -> XmlElement {
        let mut root = XmlElement::new("BIF").with_attribute("version", FORMAT_VERSION);
        root.push(self.network.clone());
        root
    }

    /// The `NETWORK` element.
    #[must_use]
    pub fn network(&self) -> &XmlElement {
        &self.network
    }

    /// `VARIABLE` elements, sorted by variable name.
    pub fn variables(&self) -> impl Iterator<Item = &XmlElement> {
        self.network().find_all("VARIABLE")
    }

    /// `DEFINITION` elements, sorted by variable name.
    pub fn definitions(&self) -> impl Iterator<Item = &XmlElement> {
        self.network().find_all("DEFINITION")
    }

    /// Serialize the document into a string, formatted according to the configuration.
    pub fn to_xml_string(&self) -> Result<String, XmlBifError> {
        self.root().to_document_string(&self.config)
    }

    /// Serialize the document into bytes of the configured encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlBifError> {
        // Non-ASCII characters are already replaced when the encoding requires it.
        self.to_xml_string().map(String::into_bytes)
    }
}

impl Display for XmlBifWriter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let document = self.to_xml_string().map_err(|_| std::fmt::Error)?;
        f.write_str(&document)
    }
}

fn sorted_variables(network: &BifNetwork) -> Vec<&str> {
    let mut variables = network
        .variables()
        .iter()
        .map(|it| it.as_str())
        .collect::<Vec<_>>();
    variables.sort_unstable();
    variables
}

fn sorted_parents<'a>(network: &'a BifNetwork, variable: &str) -> Vec<&'a str> {
    let mut parents = network
        .parents_of(variable)
        .iter()
        .map(|it| it.as_str())
        .collect::<Vec<_>>();
    parents.sort_unstable();
    parents
}

/// Add one `VARIABLE` element per variable, with its name, outcomes and properties.
fn add_variables(xml_network: &mut XmlElement, network: &BifNetwork) {
    for variable in sorted_variables(network) {
        let element =
            xml_network.push(XmlElement::new("VARIABLE").with_attribute("TYPE", "nature"));
        element.push(XmlElement::with_text("NAME", variable));
        for state in network.states_of(variable).unwrap_or_default() {
            element.push(XmlElement::with_text("OUTCOME", state));
        }
        for property in network.properties_of(variable) {
            element.push(XmlElement::with_text("PROPERTY", property));
        }
    }
}

/// Add one `DEFINITION` element per variable, with its sorted parents.
fn add_definitions(xml_network: &mut XmlElement, network: &BifNetwork) {
    for variable in sorted_variables(network) {
        let element = xml_network.push(XmlElement::new("DEFINITION"));
        element.push(XmlElement::with_text("FOR", variable));
        for parent in sorted_parents(network, variable) {
            element.push(XmlElement::with_text("GIVEN", parent));
        }
    }
}

/// Append a `TABLE` to every definition whose variable has a probability table.
///
/// The reader interprets `GIVEN` elements in reverse order, so the table columns are
/// rearranged from the network's parent order into the reversed sorted order.
fn add_tables(xml_network: &mut XmlElement, network: &BifNetwork) -> Result<(), XmlBifError> {
    for definition in xml_network.children_mut() {
        if definition.tag() != "DEFINITION" {
            continue;
        }
        let Some(variable) = definition.find("FOR").and_then(|it| it.text()) else {
            continue;
        };
        let variable = variable.to_string();
        let Some(table) = network.cpd().get(&variable) else {
            continue;
        };

        let cardinalities =
            network
                .evidence_cardinalities(&variable)
                .ok_or_else(|| XmlBifError::UnknownVariable {
                    variable: variable.clone(),
                })?;
        let mut read_order = sorted_parents(network, &variable);
        read_order.reverse();
        let from = network
            .parents_of(&variable)
            .iter()
            .map(|it| it.as_str())
            .collect::<Vec<_>>();
        let table = table
            .reorder_columns(&from, &read_order, &cardinalities)
            .map_err(|source| XmlBifError::Table {
                variable: variable.clone(),
                source,
            })?;

        trace!(variable = variable.as_str(), values = table.values().len(); "Writing table");
        let text = table
            .values()
            .iter()
            .map(|it| it.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        definition.push(XmlElement::with_text("TABLE", &text));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::tests::dog_network;
    use crate::{
        BifNetwork, BifNetworkError, CpdTable, WriterConfig, XmlBifError, XmlBifReader,
        XmlBifWriter, XmlEncoding,
    };
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn texts<'a>(element: &'a crate::XmlElement, tag: &'a str) -> Vec<&'a str> {
        element
            .find_all(tag)
            .filter_map(|it| it.text())
            .collect()
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut network = BifNetwork::new(Some("n"));
        network
            .add_variable("a", &["x", "y"])
            .set_properties("a", &["p"])
            .set_cpd("a", CpdTable::from_flat(vec![0.2, 0.8], 2).unwrap());
        let writer = XmlBifWriter::new(&network, WriterConfig::default()).unwrap();
        let expected = r#"<BIF version="0.3">
  <NETWORK>
    <NAME>n</NAME>
    <VARIABLE TYPE="nature">
      <NAME>a</NAME>
      <OUTCOME>x</OUTCOME>
      <OUTCOME>y</OUTCOME>
      <PROPERTY>p</PROPERTY>
    </VARIABLE>
    <DEFINITION>
      <FOR>a</FOR>
      <TABLE>0.2 0.8</TABLE>
    </DEFINITION>
  </NETWORK>
</BIF>
"#;
        assert_eq!(writer.to_xml_string().unwrap(), expected);
        assert_eq!(writer.to_string(), expected);
        assert_eq!(writer.to_bytes().unwrap(), expected.as_bytes());
    }

    #[test]
    fn root_wraps_network_element() {
        let writer = XmlBifWriter::new(&dog_network(), WriterConfig::default()).unwrap();
        let root = writer.root();
        assert_eq!(root.tag(), "BIF");
        assert_eq!(root.attribute("version"), Some("0.3"));
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.find("NETWORK"), Some(writer.network()));
        assert_eq!(texts(writer.network(), "NAME"), vec!["Dog-Problem"]);
        assert_eq!(writer.variables().count(), 5);
        assert_eq!(writer.definitions().count(), 5);
    }

    #[test]
    fn compact_output_without_name() {
        let mut network = BifNetwork::new(None);
        network.add_variable("a", &["x"]);
        let config = WriterConfig {
            xml_declaration: true,
            ..WriterConfig::compact()
        };
        let writer = XmlBifWriter::new(&network, config).unwrap();
        assert_eq!(
            writer.to_xml_string().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><BIF version=\"0.3\"><NETWORK>\
             <VARIABLE TYPE=\"nature\"><NAME>a</NAME><OUTCOME>x</OUTCOME></VARIABLE>\
             <DEFINITION><FOR>a</FOR></DEFINITION></NETWORK></BIF>"
        );
    }

    #[test]
    fn elements_are_sorted_by_name() {
        let mut network = BifNetwork::new(None);
        network
            .add_variable("b", &["1", "0"])
            .add_variable("a", &["1", "0"])
            .add_variable("c", &["z", "y", "x"])
            .set_parents("c", &["b", "a"]);
        let writer = XmlBifWriter::new(&network, WriterConfig::default()).unwrap();

        let variables = writer
            .variables()
            .filter_map(|it| it.find("NAME").and_then(|n| n.text()))
            .collect::<Vec<_>>();
        assert_eq!(variables, vec!["a", "b", "c"]);
        let definitions = writer
            .definitions()
            .filter_map(|it| it.find("FOR").and_then(|n| n.text()))
            .collect::<Vec<_>>();
        assert_eq!(definitions, vec!["a", "b", "c"]);

        let c = writer.definitions().nth(2).unwrap();
        assert_eq!(texts(c, "GIVEN"), vec!["a", "b"]);
        // Outcomes keep their order.
        let c = writer.variables().nth(2).unwrap();
        assert_eq!(texts(c, "OUTCOME"), vec!["z", "y", "x"]);

        let xml = writer.to_xml_string().unwrap();
        let a = xml.find("<NAME>a</NAME>").unwrap();
        let b = xml.find("<NAME>b</NAME>").unwrap();
        let c = xml.find("<NAME>c</NAME>").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn dog_network_survives_round_trip() {
        let network = dog_network();
        let writer = XmlBifWriter::new(&network, WriterConfig::default()).unwrap();
        let reader = XmlBifReader::from_xml_str(&writer.to_xml_string().unwrap()).unwrap();

        assert_eq!(reader.network_name(), Some("Dog-Problem"));
        assert_eq!(
            reader.variables(),
            ["bowel-problem", "dog-out", "family-out", "hear-bark", "light-on"]
        );
        for variable in network.variables() {
            assert_eq!(reader.states()[variable], network.states()[variable]);
            assert_eq!(reader.properties()[variable], network.properties()[variable]);
            assert_eq!(reader.parents()[variable], network.parents()[variable]);
            assert_eq!(reader.cpd()[variable], network.cpd()[variable]);
        }
    }

    #[test]
    fn tables_follow_given_order() {
        let mut network = BifNetwork::new(Some("permuted"));
        network
            .add_variable("a", &["a0", "a1"])
            .add_variable("b", &["b0", "b1", "b2"])
            .add_variable("c", &["c0", "c1"])
            .set_parents("c", &["a", "b"])
            .set_cpd(
                "c",
                CpdTable::new(
                    2,
                    6,
                    vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5],
                )
                .unwrap(),
            );

        let writer = XmlBifWriter::new(&network, WriterConfig::default()).unwrap();
        let c = writer.definitions().nth(2).unwrap();
        assert_eq!(texts(c, "GIVEN"), vec!["a", "b"]);
        assert_eq!(
            texts(c, "TABLE"),
            vec!["0 0.3 0.1 0.4 0.2 0.5 1 0.7 0.9 0.6 0.8 0.5"]
        );

        let reader = XmlBifReader::from_xml_str(&writer.to_xml_string().unwrap()).unwrap();
        assert_eq!(reader.parents()["c"], ["b", "a"]);

        let original = XmlBifReader::from_xml_str(
            &XmlBifWriter::new(&network, WriterConfig::compact())
                .unwrap()
                .to_xml_string()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(original, reader);

        let before = crate::BayesianNetwork::try_from(&network).unwrap();
        let after = reader.build_model().unwrap();
        let before = before.get_cpd("c").unwrap();
        let after = after.get_cpd("c").unwrap();
        for c_state in 0..2 {
            for a_state in 0..2 {
                for b_state in 0..3 {
                    assert_eq!(
                        before.probability(c_state, &[a_state, b_state]),
                        after.probability(c_state, &[b_state, a_state])
                    );
                }
            }
        }
    }

    #[test]
    fn invalid_network_is_rejected() {
        let mut network = BifNetwork::new(None);
        network
            .add_variable("a", &["t", "f"])
            .set_parents("a", &["ghost"]);
        let error = XmlBifWriter::new(&network, WriterConfig::default()).unwrap_err();
        assert!(matches!(
            error,
            XmlBifError::Invalid(errors) if errors == vec![BifNetworkError::ParentNotFound {
                variable: "a".to_string(),
                parent: "ghost".to_string(),
            }]
        ));
    }

    #[test]
    fn ascii_output_round_trips() {
        let mut network = BifNetwork::new(Some("po\u{10d}asie"));
        network.add_variable("d\u{e1}\u{17e}\u{10f}", &["\u{e1}no", "nie"]);
        let config = WriterConfig {
            encoding: XmlEncoding::Ascii,
            pretty_print: true,
            xml_declaration: true,
        };
        let writer = XmlBifWriter::new(&network, config).unwrap();
        let xml = writer.to_xml_string().unwrap();
        assert!(xml.is_ascii());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"US-ASCII\"?>\n<BIF"));

        let reader = XmlBifReader::from_xml_str(&xml).unwrap();
        assert_eq!(reader.network_name(), Some("po\u{10d}asie"));
        assert_eq!(reader.variables(), ["d\u{e1}\u{17e}\u{10f}"]);
        assert_eq!(reader.states()["d\u{e1}\u{17e}\u{10f}"], ["\u{e1}no", "nie"]);
    }

    fn variable_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::btree_set("[a-z]{1,8}", 1..8)
            .prop_map(|names| names.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn variable_set_survives_round_trip(names in variable_names()) {
            let mut network = BifNetwork::new(None);
            for name in &names {
                let states = (0..name.len() % 3 + 1)
                    .map(|i| format!("{name}_{i}"))
                    .collect::<Vec<_>>();
                let states = states.iter().map(|it| it.as_str()).collect::<Vec<_>>();
                network.add_variable(name, &states);
            }

            let writer = XmlBifWriter::new(&network, WriterConfig::default()).unwrap();
            let reader = XmlBifReader::from_xml_str(&writer.to_xml_string().unwrap()).unwrap();

            let expected = names.iter().collect::<BTreeSet<_>>();
            let actual = reader.variables().iter().collect::<BTreeSet<_>>();
            prop_assert_eq!(expected, actual);
            for name in &names {
                prop_assert_eq!(&reader.states()[name], &network.states()[name]);
            }

            // The written order is canonical, regardless of the declaration order.
            let mut sorted = names.clone();
            sorted.sort();
            prop_assert_eq!(reader.variables(), sorted.as_slice());
        }
    }
}
