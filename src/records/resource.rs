//! Resource — a quantity of memory and vcores.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A resource quantity, used both for node capacity and for usage figures.
///
/// Component-wise arithmetic only; no dimension is ever negative. Whether a
/// usage figure fits inside a capacity is a producer-side contract, checked
/// (if at all) by whoever computes the numbers, never by the records
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    pub memory_mb: u64,
    pub vcores: u32,
}

impl Resource {
    pub fn new(memory_mb: u64, vcores: u32) -> Self {
        Self { memory_mb, vcores }
    }

    /// The zero-valued resource, reported for usage tiers a node has none of.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.memory_mb == 0 && self.vcores == 0
    }

    /// Component-wise `<=` against a capacity.
    pub fn fits_within(&self, capacity: Resource) -> bool {
        self.memory_mb <= capacity.memory_mb && self.vcores <= capacity.vcores
    }
}

impl Add for Resource {
    type Output = Resource;

    fn add(self, rhs: Resource) -> Resource {
        Resource {
            memory_mb: self.memory_mb.saturating_add(rhs.memory_mb),
            vcores: self.vcores.saturating_add(rhs.vcores),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<memory:{} MB, vCores:{}>", self.memory_mb, self.vcores)
    }
}
