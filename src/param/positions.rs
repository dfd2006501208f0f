use crate::*;

/// A parameter paired with the 1-based ordinals of its placeholders in the
/// rendered text, in left to right order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterWithPositions {
    pub parameter: Parameter,
    pub positions: Vec<usize>,
}

impl ParameterWithPositions {
    pub fn new(parameter: Parameter, positions: Vec<usize>) -> Self {
        Self {
            parameter,
            positions,
        }
    }

    pub fn name(&self) -> &str {
        self.parameter.name()
    }
}
