//! Provides the [`VariableSelector`] trait which is required for variable selectors to
//! implement; the main method in this trait is [`VariableSelector::select_variable`].
//!
//! Ties are broken in favour of the shared domain which comes first in the list given to the
//! selector.

mod anti_first_fail;
mod first_fail;
mod input_order;
mod variable_selector;

pub use anti_first_fail::AntiFirstFail;
pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use variable_selector::VariableSelector;
