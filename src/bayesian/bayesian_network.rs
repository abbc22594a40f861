use crate::TabularCpd;
use indexmap::IndexMap;
use log::trace;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A Bayesian network: a directed graph over named variables, together with
/// a conditional probability table for (some of) its variables.
///
/// Node and edge insertion is idempotent. Probability tables can only be attached
/// to variables that are already nodes of the graph, and their evidence must be
/// nodes as well.
#[derive(Debug, Clone, Default)]
pub struct BayesianNetwork {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
    cpds: IndexMap<String, TabularCpd>,
}

impl BayesianNetwork {
    /// Create a new network containing exactly the endpoints of the given `(parent, child)`
    /// edges.
    #[must_use]
    pub fn from_edges<S: AsRef<str>>(edges: &[(S, S)]) -> Self {
        let mut network = BayesianNetwork::default();
        for (parent, child) in edges {
            network.add_edge(parent.as_ref(), child.as_ref());
        }
        network
    }

    /// Add a node (if it does not exist yet) and return its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.indices.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), index);
        index
    }

    /// Add an edge `parent -> child`, creating both nodes if necessary.
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        let parent = self.add_node(parent);
        let child = self.add_node(child);
        self.graph.update_edge(parent, child, ());
    }

    /// Attach the given probability tables to the network.
    ///
    /// Either all tables are attached, or none is: the call fails if one of them mentions
    /// a variable that is not a node, or if its variable already has a table (attached
    /// earlier, or repeated in `cpds`).
    pub fn add_cpds(&mut self, cpds: Vec<TabularCpd>) -> Result<(), BayesianNetworkError> {
        let mut attached = HashSet::new();
        for cpd in &cpds {
            if !self.contains(cpd.variable()) {
                return Err(BayesianNetworkError::NodeNotFound {
                    variable: cpd.variable().to_string(),
                });
            }
            if let Some(evidence) = cpd.evidence().iter().find(|it| !self.contains(it)) {
                return Err(BayesianNetworkError::EvidenceNotFound {
                    variable: cpd.variable().to_string(),
                    evidence: evidence.clone(),
                });
            }
            if self.cpds.contains_key(cpd.variable()) || !attached.insert(cpd.variable()) {
                return Err(BayesianNetworkError::CpdAlreadyDefined {
                    variable: cpd.variable().to_string(),
                });
            }
        }
        for cpd in cpds {
            trace!(variable = cpd.variable(); "Attaching probability table");
            self.cpds.insert(cpd.variable().to_string(), cpd);
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|it| it.as_str())
    }

    /// All `(parent, child)` edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].as_str(),
                    self.graph[edge.target()].as_str(),
                )
            })
            .collect()
    }

    /// Parents of the given node, sorted by name. Unknown nodes have no parents.
    #[must_use]
    pub fn parents(&self, name: &str) -> Vec<&str> {
        let Some(index) = self.indices.get(name) else {
            return Vec::new();
        };
        let mut parents = self
            .graph
            .neighbors_directed(*index, Direction::Incoming)
            .map(|it| self.graph[it].as_str())
            .collect::<Vec<_>>();
        parents.sort_unstable();
        parents
    }

    #[must_use]
    pub fn get_cpd(&self, variable: &str) -> Option<&TabularCpd> {
        self.cpds.get(variable)
    }

    /// Attached probability tables, in the order in which they were added.
    pub fn cpds(&self) -> impl Iterator<Item = &TabularCpd> {
        self.cpds.values()
    }

    /// Read-only access to the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}

/// Possible errors when building a [`BayesianNetwork`] or its [`TabularCpd`] objects.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BayesianNetworkError {
    #[error("(Variable `{variable}`) Not a node of the network")]
    NodeNotFound { variable: String },
    #[error("(Variable `{variable}`) Evidence `{evidence}` is not a node of the network")]
    EvidenceNotFound { variable: String, evidence: String },
    #[error("(Variable `{variable}`) Probability table is already defined")]
    CpdAlreadyDefined { variable: String },
    #[error(
        "(Variable `{variable}`) Found `{evidence}` evidence variables, but `{cardinalities}` cardinalities"
    )]
    EvidenceLengthMismatch {
        variable: String,
        evidence: usize,
        cardinalities: usize,
    },
    #[error("(Variable `{variable}`) Expected `{expected}` probability values, found `{actual}`")]
    ValuesShapeMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },
}
