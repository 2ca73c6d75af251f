use std::fmt::Display;
use std::fmt::Formatter;

use enum_map::Enum;
use enumset::EnumSetType;

use crate::containers::StorageKey;

/// Identifies a shared domain: the interval storage which one or more variables alias.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId(pub(crate) u32);

impl DomainId {
    pub const fn new(index: u32) -> Self {
        DomainId(index)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId(index as u32)
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Identifies a variable of a [`crate::Problem`]; the value of a variable is the value of its
/// shared domain plus a constant offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

impl VariableId {
    pub const fn new(index: u32) -> Self {
        VariableId(index)
    }
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId(index as u32)
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Identifies a propagator; propagators are run in ascending order of their id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropagatorId(pub(crate) u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

/// One of the two bounds of an interval.
#[derive(Debug, Hash, PartialOrd, Ord, EnumSetType, Enum)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub const fn opposite(self) -> Bound {
        match self {
            Bound::Min => Bound::Max,
            Bound::Max => Bound::Min,
        }
    }
}

/// The shared domain and offset which make up a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct VariableView {
    pub(crate) domain: DomainId,
    pub(crate) offset: i32,
}
