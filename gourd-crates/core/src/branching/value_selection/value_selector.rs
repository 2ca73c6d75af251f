use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// Decides how to split the shared domain selected by a
/// [`crate::branching::variable_selection::VariableSelector`].
pub trait ValueSelector {
    /// Returns the decision for `decision_variable`, which is not fixed.
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> Decision;
}
