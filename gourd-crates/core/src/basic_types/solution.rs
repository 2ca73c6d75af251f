use crate::containers::StorageKey;
use crate::engine::VariableId;

/// The value of every variable of a problem at the moment the solver found a solution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    values: Box<[i32]>,
}

impl Solution {
    pub fn new(values: impl Into<Box<[i32]>>) -> Solution {
        Solution {
            values: values.into(),
        }
    }

    pub fn value(&self, variable: VariableId) -> i32 {
        self.values[variable.index()]
    }

    /// The values indexed by variable, in the order the variables were created.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn into_values(self) -> Vec<i32> {
        self.values.into_vec()
    }
}
