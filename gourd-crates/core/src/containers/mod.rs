//! Contains containers which are used by the solver.
mod keyed_vec;
mod triggered_set;

pub use keyed_vec::*;
pub(crate) use triggered_set::*;
