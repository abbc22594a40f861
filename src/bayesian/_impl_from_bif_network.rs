use crate::{BayesianNetwork, BifNetwork, TabularCpd, Validation, XmlBifError};
use log::debug;

/// Convert a [`BifNetwork`] into a [`BayesianNetwork`].
///
/// The graph is built from [`BifNetwork::edges`], and every declared variable is added as a
/// node (so that isolated variables are not lost). Then, one [`TabularCpd`] is created for
/// each variable that has a probability table, using the parents as evidence.
///
/// The network must pass validation, otherwise [`XmlBifError::Invalid`] is returned with all
/// the validation errors.
impl TryFrom<&BifNetwork> for BayesianNetwork {
    type Error = XmlBifError;

    fn try_from(network: &BifNetwork) -> Result<Self, Self::Error> {
        network.validate().map_err(XmlBifError::Invalid)?;

        let mut model = BayesianNetwork::from_edges(&network.edges());
        for variable in network.variables() {
            model.add_node(variable);
        }

        let mut cpds = Vec::with_capacity(network.cpd().len());
        for (variable, table) in network.cpd() {
            // After validation, all these variables must be declared.
            let unknown = || XmlBifError::UnknownVariable {
                variable: variable.clone(),
            };
            let cardinality = network.cardinality(variable).ok_or_else(unknown)?;
            let evidence_cardinality = network
                .evidence_cardinalities(variable)
                .ok_or_else(unknown)?;
            cpds.push(TabularCpd::new(
                variable.clone(),
                cardinality,
                table.values().to_vec(),
                network.parents_of(variable).to_vec(),
                evidence_cardinality,
            )?);
        }
        model.add_cpds(cpds)?;

        debug!(
            nodes = model.node_count(),
            edges = model.edge_count(),
            cpds = network.cpd().len();
            "Built Bayesian network"
        );
        Ok(model)
    }
}
