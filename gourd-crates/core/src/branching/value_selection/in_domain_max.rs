use crate::branching::value_selection::ValueSelector;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`ValueSelector`] which first tries the upper bound of the domain, i.e. decides
/// `x >= max` with `x <= max - 1` as the alternative.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMax;

impl ValueSelector for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision {
        Decision::GreaterOrEqual {
            domain: decision_variable,
            value: context.upper_bound(decision_variable),
        }
    }
}
