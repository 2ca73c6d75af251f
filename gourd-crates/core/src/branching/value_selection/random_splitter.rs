use rand::Rng;

use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`ValueSelector`] which splits the domain at a random value, randomly choosing whether the
/// lower or the upper part is explored first.
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomSplitter;

impl ValueSelector for RandomSplitter {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let bounds = context.bounds(decision_variable);
        // Splitting between `pivot` and `pivot + 1` leaves both parts non-empty.
        let pivot = context.random().gen_range(bounds.min..bounds.max);

        if context.random().gen_bool(0.5) {
            Decision::LessOrEqual {
                domain: decision_variable,
                value: pivot,
            }
        } else {
            Decision::GreaterOrEqual {
                domain: decision_variable,
                value: pivot + 1,
            }
        }
    }
}
