//! Node identity and lifecycle enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Unique identifier of a worker node: the host it runs on and the port its
/// node agent listens on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    host: String,
    port: u16,
}

impl NodeId {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidNodeId(s.to_string()))?;
        if host.is_empty() {
            return Err(Error::InvalidNodeId(s.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| Error::InvalidNodeId(s.to_string()))?;
        Ok(Self::new(host, port))
    }
}

/// Lifecycle state of a node, as last reported by the resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    /// Registered but not yet scheduled on.
    New,
    /// Healthy and accepting containers.
    Running,
    /// Failing its health check; no new containers placed.
    Unhealthy,
    /// Draining ahead of removal.
    Decommissioning,
    /// Removed from service.
    Decommissioned,
    /// Stopped heartbeating.
    Lost,
    /// Rebooted since last report.
    Rebooted,
    /// Shut down gracefully.
    Shutdown,
}

impl NodeState {
    /// Whether the node can take no further work.
    pub fn is_unusable(&self) -> bool {
        matches!(
            self,
            NodeState::Unhealthy
                | NodeState::Decommissioned
                | NodeState::Lost
                | NodeState::Shutdown
        )
    }

    /// Whether the node still runs containers (draining nodes keep theirs
    /// until the timeout expires).
    pub fn is_active(&self) -> bool {
        matches!(self, NodeState::Running | NodeState::Decommissioning)
    }
}

/// Cause of the most recent node-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeUpdateType {
    NodeUsable,
    NodeUnusable,
    NodeDecommissioning,
}

impl Default for NodeUpdateType {
    /// The conservative assumption when the cause of an update is unknown.
    fn default() -> Self {
        Self::NodeUnusable
    }
}
