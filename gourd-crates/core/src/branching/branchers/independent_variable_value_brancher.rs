use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;

/// A [`Brancher`] which first selects a shared domain with its [`VariableSelector`] and then
/// asks its [`ValueSelector`] how to split it.
#[derive(Clone, Debug)]
pub struct IndependentVariableValueBrancher<VariableSelection, ValueSelection> {
    variable_selector: VariableSelection,
    value_selector: ValueSelection,
}

impl<VariableSelection, ValueSelection>
    IndependentVariableValueBrancher<VariableSelection, ValueSelection>
where
    VariableSelection: VariableSelector,
    ValueSelection: ValueSelector,
{
    pub fn new(variable_selector: VariableSelection, value_selector: ValueSelection) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
        }
    }
}

impl<VariableSelection, ValueSelection> Brancher
    for IndependentVariableValueBrancher<VariableSelection, ValueSelection>
where
    VariableSelection: VariableSelector,
    ValueSelection: ValueSelector,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        self.variable_selector
            .select_variable(context)
            .map(|domain| self.value_selector.select_value(context, domain))
    }
}
