use crate::BayesianNetworkError;
use crate::utils::{mixed_radix_index, saturating_product};
use serde::{Deserialize, Serialize};

/// A conditional probability table `P(variable | evidence)`.
///
/// Values are stored in row-major order: there is one row per state of `variable` and
/// one column per configuration of the evidence. Evidence configurations are enumerated
/// such that the first evidence variable is the most significant (the last one changes
/// the fastest).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TabularCpd {
    variable: String,
    cardinality: usize,
    values: Vec<f64>,
    evidence: Vec<String>,
    evidence_cardinality: Vec<usize>,
}

impl TabularCpd {
    /// Create a new table, checking that the number of `values` matches
    /// `cardinality * product(evidence_cardinality)`.
    pub fn new(
        variable: String,
        cardinality: usize,
        values: Vec<f64>,
        evidence: Vec<String>,
        evidence_cardinality: Vec<usize>,
    ) -> Result<Self, BayesianNetworkError> {
        if evidence.len() != evidence_cardinality.len() {
            return Err(BayesianNetworkError::EvidenceLengthMismatch {
                variable,
                evidence: evidence.len(),
                cardinalities: evidence_cardinality.len(),
            });
        }
        let expected = cardinality.saturating_mul(saturating_product(&evidence_cardinality));
        if values.len() != expected {
            return Err(BayesianNetworkError::ValuesShapeMismatch {
                variable,
                expected,
                actual: values.len(),
            });
        }
        Ok(TabularCpd {
            variable,
            cardinality,
            values,
            evidence,
            evidence_cardinality,
        })
    }

    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    #[must_use]
    pub fn evidence_cardinality(&self) -> &[usize] {
        &self.evidence_cardinality
    }

    /// Number of evidence configurations (columns of the table).
    #[must_use]
    pub fn columns(&self) -> usize {
        saturating_product(&self.evidence_cardinality)
    }

    /// Variable followed by its evidence.
    #[must_use]
    pub fn scope(&self) -> Vec<&str> {
        std::iter::once(self.variable.as_str())
            .chain(self.evidence.iter().map(|it| it.as_str()))
            .collect()
    }

    /// Probability of `state` given the evidence states (indices in evidence order).
    ///
    /// Returns `None` if a state index is out of range or the evidence length is wrong.
    #[must_use]
    pub fn probability(&self, state: usize, evidence_states: &[usize]) -> Option<f64> {
        if state >= self.cardinality {
            return None;
        }
        let column = mixed_radix_index(evidence_states, &self.evidence_cardinality)?;
        let index = state.checked_mul(self.columns())?.checked_add(column)?;
        self.values.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BayesianNetworkError, TabularCpd};

    fn dog_out() -> TabularCpd {
        TabularCpd::new(
            "dog-out".to_string(),
            2,
            vec![0.99, 0.01, 0.97, 0.03, 0.9, 0.1, 0.3, 0.7],
            vec!["family-out".to_string(), "bowel-problem".to_string()],
            vec![2, 2],
        )
        .unwrap()
    }

    #[test]
    fn lookup_uses_row_major_order() {
        let cpd = dog_out();
        assert_eq!(cpd.columns(), 4);
        assert_eq!(cpd.scope(), vec!["dog-out", "family-out", "bowel-problem"]);
        assert_eq!(cpd.probability(0, &[0, 0]), Some(0.99));
        assert_eq!(cpd.probability(0, &[0, 1]), Some(0.01));
        assert_eq!(cpd.probability(0, &[1, 0]), Some(0.97));
        assert_eq!(cpd.probability(1, &[1, 1]), Some(0.7));
        assert_eq!(cpd.probability(2, &[0, 0]), None);
        assert_eq!(cpd.probability(0, &[0]), None);
    }

    #[test]
    fn shape_is_checked() {
        let error = TabularCpd::new(
            "a".to_string(),
            2,
            vec![0.5, 0.5, 0.5],
            vec!["b".to_string()],
            vec![2],
        )
        .unwrap_err();
        assert_eq!(
            error,
            BayesianNetworkError::ValuesShapeMismatch {
                variable: "a".to_string(),
                expected: 4,
                actual: 3
            }
        );

        let error =
            TabularCpd::new("a".to_string(), 1, vec![1.0], vec!["b".to_string()], vec![])
                .unwrap_err();
        assert!(matches!(
            error,
            BayesianNetworkError::EvidenceLengthMismatch { .. }
        ));
    }

    #[test]
    fn huge_evidence_does_not_overflow() {
        let error = TabularCpd::new(
            "a".to_string(),
            2,
            vec![0.5, 0.5],
            vec!["b".to_string(), "c".to_string()],
            vec![usize::MAX, 2],
        )
        .unwrap_err();
        assert_eq!(
            error,
            BayesianNetworkError::ValuesShapeMismatch {
                variable: "a".to_string(),
                expected: usize::MAX,
                actual: 2
            }
        );
    }
}
