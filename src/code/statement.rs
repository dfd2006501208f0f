use crate::*;

/// Finished output of a [`CodeBuilder`]: the SQL text and, per distinct
/// parameter, the 1-based ordinals of its placeholders.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
#[display("{sql}")]
pub struct Statement {
    pub sql: String,
    pub parameters: Vec<ParameterWithPositions>,
}

impl Statement {
    /// Parameter bound at placeholder `position` (1-based).
    pub fn parameter_at(&self, position: usize) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|entry| entry.positions.contains(&position))
            .map(|entry| &entry.parameter)
    }

    /// Parameters in placeholder order, repeated once per occurrence.
    pub fn bind_order(&self) -> Vec<&Parameter> {
        let total = self.parameters.iter().map(|e| e.positions.len()).sum();
        (1..=total).filter_map(|pos| self.parameter_at(pos)).collect()
    }
}
