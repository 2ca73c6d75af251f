use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the unfixed shared domain with the most values.
#[derive(Clone, Debug)]
pub struct AntiFirstFail {
    variables: Vec<DomainId>,
}

impl AntiFirstFail {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }
        AntiFirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for AntiFirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        let mut selected: Option<(DomainId, u64)> = None;
        for &variable in &self.variables {
            if context.is_fixed(variable) {
                continue;
            }
            let size = context.get_size_of_domain(variable);
            if selected.map_or(true, |(_, largest)| size > largest) {
                selected = Some((variable, size));
            }
        }
        selected.map(|(variable, _)| variable)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::basic_types::Interval;

    #[test]
    fn largest_domain_is_selected_and_ties_go_to_the_first() {
        let domains = [
            Interval::new(0, 3),
            Interval::new(5, 10),
            Interval::new(0, 5),
            Interval::new(1, 1),
        ];
        let mut rng = SmallRng::seed_from_u64(0);
        let mut context = SelectionContext::new(&domains, &mut rng);

        let variables: Vec<_> = (0..4).map(DomainId::new).collect();
        let mut selector = AntiFirstFail::new(&variables);

        assert_eq!(selector.select_variable(&mut context), Some(DomainId::new(1)));
    }
}
