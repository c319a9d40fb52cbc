//! Protocol records for the fleetd resource manager's client API.
//!
//! Clients enumerating the cluster receive one [`NodeReport`] per worker
//! node: identity, lifecycle state, addresses, rack placement, capacity, and
//! the guaranteed/opportunistic resources currently in use. The resource
//! manager produces these snapshots; clients read them. This crate only
//! defines the records and their defaulting rules. Transport and the
//! manager-side computation of the values live elsewhere.

pub mod error;
pub mod records;

pub use error::{Error, Result};
pub use records::{
    NodeId, NodeReport, NodeState, NodeUpdateType, Resource, ResourceUtilization,
};
