use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::gourd_assert_advanced;

/// A [`ValueSelector`] which splits the domain in half and explores the lower half first.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainSplit;

impl ValueSelector for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        let bounds = context.bounds(decision_variable);
        // The domain holds at least two values, so the midpoint is strictly below the maximum.
        let value = ((bounds.min as i64 + bounds.max as i64).div_euclid(2)) as i32;
        gourd_assert_advanced!(
            bounds.min <= value && value < bounds.max,
            "It should hold that {} <= {value} < {}",
            bounds.min,
            bounds.max
        );

        Decision::LessOrEqual {
            domain: decision_variable,
            value,
        }
    }
}
