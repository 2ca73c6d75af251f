use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// Selects the shared domain to branch on.
pub trait VariableSelector {
    /// Determines which shared domain to branch on next. Returns [`None`] only when every
    /// shared domain the selector considers is fixed.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId>;
}
