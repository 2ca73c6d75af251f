//! Contains the traits and structures which define the decision making of the [`Solver`].
//!
//! There are three traits:
//! - The [`Brancher`], which picks the next [`Decision`]: a shared domain and a value at which
//!   to split it. The solver first explores the branch of the decision and, on backtracking, the
//!   complementary one. The main implementation is the [`IndependentVariableValueBrancher`].
//! - The [`VariableSelector`], which picks the shared domain to branch on, for example
//!   [`FirstFail`].
//! - The [`ValueSelector`], which picks how to split the selected domain, for example
//!   [`InDomainMin`].
//!
//! A [`Brancher`] is handed to the solver through [`Solver::with_brancher`].

mod brancher;
pub mod branchers;
mod decision;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use decision::Decision;
pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::branching::branchers::IndependentVariableValueBrancher;
#[cfg(doc)]
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::FirstFail;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
#[cfg(doc)]
use crate::Solver;
