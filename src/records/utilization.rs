//! Aggregated utilization metrics for a node or its containers.

use serde::{Deserialize, Serialize};

/// Point-in-time utilization: physical/virtual memory in megabytes and CPU
/// as a fraction of total node capacity (0.0 to 1.0 by producer convention).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub physical_memory_mb: u64,
    pub virtual_memory_mb: u64,
    pub cpu: f32,
}

impl ResourceUtilization {
    pub fn new(physical_memory_mb: u64, virtual_memory_mb: u64, cpu: f32) -> Self {
        Self {
            physical_memory_mb,
            virtual_memory_mb,
            cpu,
        }
    }
}
