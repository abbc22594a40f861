use crate::utils::saturating_product;
use crate::{CpdTable, ErrorReporter, Validation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashSet;
use thiserror::Error;

/// The intermediate representation of a Bayesian network exchanged through XMLBIF.
///
/// It consists of five interdependent facts about the network variables:
/// - `variables`: unique variable names in declaration order;
/// - `states`: ordered state labels (outcomes) of every variable;
/// - `parents`: evidence variables of every variable that has a definition. The order is
///   the *reverse* of the `GIVEN` order in the XMLBIF document, because that is the order
///   in which the columns of the probability table enumerate parent configurations;
/// - `cpds`: probability tables with one row per state and one column per parent
///   configuration;
/// - `properties`: free-form annotations of every variable (often layout positions).
///
/// The network name is optional. All maps preserve insertion order. The structure itself
/// does not enforce consistency between these parts, use [`Validation`] to check it.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BifNetwork {
    pub name: Option<String>,
    pub variables: Vec<String>,
    #[serde(default)]
    pub states: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub parents: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub cpds: IndexMap<String, CpdTable>,
    #[serde(default)]
    pub properties: IndexMap<String, Vec<String>>,
}

impl BifNetwork {
    /// Create a new empty network with an optional name.
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        BifNetwork {
            name: name.map(|it| it.to_string()),
            ..Default::default()
        }
    }

    /// Declare a new variable with the given states and no properties.
    pub fn add_variable(&mut self, name: &str, states: &[&str]) -> &mut Self {
        self.variables.push(name.to_string());
        self.states
            .insert(name.to_string(), states.iter().map(|it| it.to_string()).collect());
        self.properties.insert(name.to_string(), Vec::new());
        self
    }

    /// Set the parents of a variable, in the evidence order of its probability table.
    pub fn set_parents(&mut self, variable: &str, parents: &[&str]) -> &mut Self {
        self.parents.insert(
            variable.to_string(),
            parents.iter().map(|it| it.to_string()).collect(),
        );
        self
    }

    pub fn set_properties(&mut self, variable: &str, properties: &[&str]) -> &mut Self {
        self.properties.insert(
            variable.to_string(),
            properties.iter().map(|it| it.to_string()).collect(),
        );
        self
    }

    pub fn set_cpd(&mut self, variable: &str, table: CpdTable) -> &mut Self {
        self.cpds.insert(variable.to_string(), table);
        self
    }

    #[must_use]
    pub fn network_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    #[must_use]
    pub fn states(&self) -> &IndexMap<String, Vec<String>> {
        &self.states
    }

    #[must_use]
    pub fn states_of(&self, variable: &str) -> Option<&[String]> {
        self.states.get(variable).map(|it| it.as_slice())
    }

    /// Number of states of the given variable, assuming the variable is declared.
    #[must_use]
    pub fn cardinality(&self, variable: &str) -> Option<usize> {
        self.states.get(variable).map(|it| it.len())
    }

    #[must_use]
    pub fn parents(&self) -> &IndexMap<String, Vec<String>> {
        &self.parents
    }

    /// Parents of the given variable. A variable without a definition has no parents.
    #[must_use]
    pub fn parents_of(&self, variable: &str) -> &[String] {
        self.parents
            .get(variable)
            .map(|it| it.as_slice())
            .unwrap_or_default()
    }

    /// Cardinalities of the parents of the given variable, in parent order.
    ///
    /// Returns `None` if one of the parents is not a declared variable.
    #[must_use]
    pub fn evidence_cardinalities(&self, variable: &str) -> Option<Vec<usize>> {
        self.parents_of(variable)
            .iter()
            .map(|parent| self.cardinality(parent))
            .collect()
    }

    /// All `(parent, child)` pairs of the network.
    ///
    /// Pairs are grouped by child in the insertion order of `parents`, and within one
    /// child, they follow the parent order.
    #[must_use]
    pub fn edges(&self) -> Vec<(String, String)> {
        self.parents
            .iter()
            .flat_map(|(child, parents)| {
                parents
                    .iter()
                    .map(move |parent| (parent.clone(), child.clone()))
            })
            .collect()
    }

    #[must_use]
    pub fn cpd(&self) -> &IndexMap<String, CpdTable> {
        &self.cpds
    }

    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, Vec<String>> {
        &self.properties
    }

    /// Properties of the given variable. A variable without properties yields an empty slice.
    #[must_use]
    pub fn properties_of(&self, variable: &str) -> &[String] {
        self.properties
            .get(variable)
            .map(|it| it.as_slice())
            .unwrap_or_default()
    }
}

/// Possible validation errors for [`BifNetwork`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BifNetworkError {
    #[error("Network must declare at least one variable")]
    VariablesEmpty,
    #[error("(Variable `{variable}`) Name must be unique within the network")]
    VariableNotUnique { variable: String },
    #[error("(Variable `{variable}`) No states are declared")]
    StatesMissing { variable: String },
    #[error("(Variable `{variable}`) State list must not be empty")]
    StatesEmpty { variable: String },
    #[error("(Variable `{variable}`) Found in `{section}`, but never declared")]
    UnknownVariable {
        variable: String,
        section: &'static str,
    },
    #[error("(Variable `{variable}`) Parent `{parent}` is not a declared variable")]
    ParentNotFound { variable: String, parent: String },
    #[error("(Variable `{variable}`) Parent `{parent}` is listed more than once")]
    ParentNotUnique { variable: String, parent: String },
    #[error(
        "(Variable `{variable}`) Table is {rows}x{columns}, but {expected_rows}x{expected_columns} is required"
    )]
    CpdShapeMismatch {
        variable: String,
        expected_rows: usize,
        expected_columns: usize,
        rows: usize,
        columns: usize,
    },
}

impl Validation for BifNetwork {
    type Error = BifNetworkError;

    fn validate_all<R: ErrorReporter<Self::Error>>(&self, reporter: &mut R) {
        if self.variables.is_empty() {
            reporter.report(BifNetworkError::VariablesEmpty);
        }

        // Check that variables are unique and have states.
        let mut declared = HashSet::new();
        for variable in &self.variables {
            if !declared.insert(variable.as_str()) {
                reporter.report(BifNetworkError::VariableNotUnique {
                    variable: variable.clone(),
                });
                continue;
            }
            match self.states.get(variable) {
                None => reporter.report(BifNetworkError::StatesMissing {
                    variable: variable.clone(),
                }),
                Some(states) if states.is_empty() => {
                    reporter.report(BifNetworkError::StatesEmpty {
                        variable: variable.clone(),
                    })
                }
                Some(_) => (),
            }
        }

        // Every map can only talk about declared variables.
        let sections = [
            ("states", self.states.keys().collect::<Vec<_>>()),
            ("parents", self.parents.keys().collect()),
            ("cpds", self.cpds.keys().collect()),
            ("properties", self.properties.keys().collect()),
        ];
        for (section, keys) in sections {
            for key in keys {
                if !declared.contains(key.as_str()) {
                    reporter.report(BifNetworkError::UnknownVariable {
                        variable: key.clone(),
                        section,
                    });
                }
            }
        }

        for (variable, parents) in &self.parents {
            let mut seen = HashSet::new();
            for parent in parents {
                if !self.states.contains_key(parent) {
                    reporter.report(BifNetworkError::ParentNotFound {
                        variable: variable.clone(),
                        parent: parent.clone(),
                    });
                }
                if !seen.insert(parent.as_str()) {
                    reporter.report(BifNetworkError::ParentNotUnique {
                        variable: variable.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        // Tables of unknown variables or with unknown parents are already reported above.
        for (variable, table) in &self.cpds {
            let (Some(expected_rows), Some(cardinalities)) = (
                self.cardinality(variable),
                self.evidence_cardinalities(variable),
            ) else {
                continue;
            };
            let expected_columns = saturating_product(&cardinalities);
            if table.rows() != expected_rows || table.columns() != expected_columns {
                reporter.report(BifNetworkError::CpdShapeMismatch {
                    variable: variable.clone(),
                    expected_rows,
                    expected_columns,
                    rows: table.rows(),
                    columns: table.columns(),
                });
            }
        }
    }
}
