/// The directed graph of a Bayesian network with attached probability tables.
mod bayesian_network;
/// Conditional probability table of a single variable.
mod tabular_cpd;
/// Implementation of conversion from [`crate::BifNetwork`].
mod _impl_from_bif_network;

pub use bayesian_network::{BayesianNetwork, BayesianNetworkError};
pub use tabular_cpd::TabularCpd;
