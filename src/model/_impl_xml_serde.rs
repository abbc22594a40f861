use crate::serde::xml::XmlBif;
use crate::utils::{take_if_not_blank, trim_all};
use crate::{BifNetwork, CpdTable, XmlBifError};
use log::trace;

impl TryFrom<XmlBif> for BifNetwork {
    type Error = XmlBifError;

    /// Extract all parts of the network from a deserialized XMLBIF document.
    ///
    /// Fails if a definition refers to an undeclared variable, or if a probability
    /// table cannot be parsed and split into rows. Other inconsistencies are left for
    /// [`crate::Validation`].
    fn try_from(value: XmlBif) -> Result<Self, Self::Error> {
        trace!(version = value.version.as_deref().unwrap_or("unknown"); "Extracting XMLBIF network");
        let xml_network = value.network;
        let mut network = BifNetwork::new(None);
        network.name = xml_network.name.as_deref().and_then(take_if_not_blank);

        for variable in xml_network.variables {
            let name = variable.name.trim().to_string();
            trace!(
                variable = name.as_str(),
                kind = variable.r#type.as_deref().unwrap_or("nature"),
                outcomes = variable.outcomes.len();
                "Extracted variable"
            );
            network.variables.push(name.clone());
            network
                .states
                .insert(name.clone(), trim_all(variable.outcomes));
            network
                .properties
                .insert(name, trim_all(variable.properties));
        }

        for definition in xml_network.definitions {
            let target = definition.target.trim().to_string();
            let Some(states) = network.cardinality(&target) else {
                return Err(XmlBifError::UnknownVariable { variable: target });
            };

            // Evidence is stored in the order in which table columns enumerate it.
            let mut given = trim_all(definition.given);
            given.reverse();

            if let Some(table) = definition.table.as_deref() {
                let values = parse_table(&target, table)?;
                let table = CpdTable::from_flat(values, states).map_err(|source| {
                    XmlBifError::Table {
                        variable: target.clone(),
                        source,
                    }
                })?;
                trace!(
                    variable = target.as_str(),
                    rows = table.rows(),
                    columns = table.columns();
                    "Extracted table"
                );
                network.cpds.insert(target.clone(), table);
            }

            network.parents.insert(target, given);
        }

        Ok(network)
    }
}

/// Parse whitespace-separated floating-point numbers of a `TABLE` element.
fn parse_table(variable: &str, table: &str) -> Result<Vec<f64>, XmlBifError> {
    table
        .split_whitespace()
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| XmlBifError::InvalidTableValue {
                    variable: variable.to_string(),
                    value: value.to_string(),
                })
        })
        .collect()
}
