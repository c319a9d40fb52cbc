//! Record types carried over the client protocol.

mod node;
mod node_report;
mod resource;
mod utilization;

pub use node::{NodeId, NodeState, NodeUpdateType};
pub use node_report::NodeReport;
pub use resource::Resource;
pub use utilization::ResourceUtilization;
