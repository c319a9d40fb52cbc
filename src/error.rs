//! Crate error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A legacy accessor was called on a report variant that does not carry
    /// the requested capability. Non-fatal: callers fall back to the
    /// supported field (e.g. `node_utilization`) or omit the value.
    #[error("capability `{capability}` is not supported by this node report")]
    UnsupportedCapability { capability: &'static str },

    /// A node id string did not parse as `host:port`.
    #[error("invalid node id `{0}`: expected host:port")]
    InvalidNodeId(String),
}
