use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the unfixed shared domain with the fewest values.
#[derive(Clone, Debug)]
pub struct FirstFail {
    variables: Vec<DomainId>,
}

impl FirstFail {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        // `min_by_key` keeps the first of equal elements.
        self.variables
            .iter()
            .filter(|&&variable| !context.is_fixed(variable))
            .min_by_key(|&&variable| context.get_size_of_domain(variable))
            .copied()
    }
}
