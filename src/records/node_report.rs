//! Node report — the per-node snapshot handed to clients enumerating the
//! cluster.
//!
//! A report is assembled in one factory call by the resource manager, then
//! crosses the protocol boundary to readers that only call accessors. It is
//! a passive snapshot: setters assign without validation, and a fresh
//! instance is built for each new report. Once published to readers a report
//! must not be mutated further; it is then safe to share across threads
//! without locking (single writer before publication, read-only after).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::node::{NodeId, NodeState, NodeUpdateType};
use super::resource::Resource;
use super::utilization::ResourceUtilization;

/// Snapshot of one worker node's state.
///
/// Producers are expected to keep `capability` at least as large as the sum
/// of the two usage tiers and `last_health_report_time` non-decreasing across
/// successive reports for the same node. Neither is enforced here: reports
/// from older managers predate both conventions, and rejecting them would
/// break clients that today receive the values as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    node_id: NodeId,
    node_state: NodeState,
    http_address: String,
    rack_name: String,
    guaranteed_resource_used: Resource,
    opportunistic_resource_used: Resource,
    capability: Resource,
    num_guaranteed_containers: u32,
    num_opportunistic_containers: u32,
    health_report: String,
    last_health_report_time: i64,
    /// `None` means "no labels known", distinct from an empty set.
    node_labels: Option<HashSet<String>>,
    node_utilization: Option<ResourceUtilization>,
    aggregated_containers_utilization: Option<ResourceUtilization>,
    decommissioning_timeout: Option<u32>,
    node_update_type: Option<NodeUpdateType>,
}

impl NodeReport {
    /// Build a report with every optional field defaulted: no labels, no
    /// decommissioning timeout, no update type, zero opportunistic usage.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        node_id: NodeId,
        node_state: NodeState,
        http_address: impl Into<String>,
        rack_name: impl Into<String>,
        guaranteed_used: Resource,
        capability: Resource,
        num_guaranteed_containers: u32,
        health_report: impl Into<String>,
        last_health_report_time: i64,
    ) -> Self {
        Self::new_extended(
            node_id,
            node_state,
            http_address,
            rack_name,
            guaranteed_used,
            capability,
            num_guaranteed_containers,
            health_report,
            last_health_report_time,
            None,
            None,
            None,
            None,
            0,
        )
    }

    /// Build a report with every field supplied. The short form delegates
    /// here; all defaulting happens in this one place.
    #[allow(clippy::too_many_arguments)]
    pub fn new_extended(
        node_id: NodeId,
        node_state: NodeState,
        http_address: impl Into<String>,
        rack_name: impl Into<String>,
        guaranteed_used: Resource,
        capability: Resource,
        num_guaranteed_containers: u32,
        health_report: impl Into<String>,
        last_health_report_time: i64,
        node_labels: Option<HashSet<String>>,
        decommissioning_timeout: Option<u32>,
        node_update_type: Option<NodeUpdateType>,
        opportunistic_used: Option<Resource>,
        num_opportunistic_containers: u32,
    ) -> Self {
        Self {
            node_id,
            node_state,
            http_address: http_address.into(),
            rack_name: rack_name.into(),
            guaranteed_resource_used: guaranteed_used,
            opportunistic_resource_used: opportunistic_used.unwrap_or_else(Resource::zero),
            capability,
            num_guaranteed_containers,
            num_opportunistic_containers,
            health_report: health_report.into(),
            last_health_report_time,
            node_labels,
            node_utilization: None,
            aggregated_containers_utilization: None,
            decommissioning_timeout,
            node_update_type,
        }
    }

    // ── Identity and placement ─────────────────────────────

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn set_node_id(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    pub fn node_state(&self) -> NodeState {
        self.node_state
    }

    pub fn set_node_state(&mut self, node_state: NodeState) {
        self.node_state = node_state;
    }

    /// HTTP tracking URL of the node; may be empty.
    pub fn http_address(&self) -> &str {
        &self.http_address
    }

    pub fn set_http_address(&mut self, http_address: impl Into<String>) {
        self.http_address = http_address.into();
    }

    /// Logical rack the node sits in; may be empty.
    pub fn rack_name(&self) -> &str {
        &self.rack_name
    }

    pub fn set_rack_name(&mut self, rack_name: impl Into<String>) {
        self.rack_name = rack_name.into();
    }

    // ── Capacity and usage ─────────────────────────────────

    /// Resource held by guaranteed-tier containers on the node.
    pub fn guaranteed_resource_used(&self) -> Resource {
        self.guaranteed_resource_used
    }

    pub fn set_guaranteed_resource_used(&mut self, guaranteed: Resource) {
        self.guaranteed_resource_used = guaranteed;
    }

    /// Historical name for [`NodeReport::guaranteed_resource_used`]; same
    /// storage, kept so pre-tiering callers keep compiling.
    #[deprecated(note = "use guaranteed_resource_used")]
    pub fn used(&self) -> Resource {
        self.guaranteed_resource_used
    }

    #[deprecated(note = "use set_guaranteed_resource_used")]
    pub fn set_used(&mut self, used: Resource) {
        self.guaranteed_resource_used = used;
    }

    /// Resource held by opportunistic-tier containers on the node.
    pub fn opportunistic_resource_used(&self) -> Resource {
        self.opportunistic_resource_used
    }

    pub fn set_opportunistic_resource_used(&mut self, opportunistic: Resource) {
        self.opportunistic_resource_used = opportunistic;
    }

    /// Total resource capacity of the node.
    pub fn capability(&self) -> Resource {
        self.capability
    }

    pub fn set_capability(&mut self, capability: Resource) {
        self.capability = capability;
    }

    pub fn num_guaranteed_containers(&self) -> u32 {
        self.num_guaranteed_containers
    }

    pub fn set_num_guaranteed_containers(&mut self, num_containers: u32) {
        self.num_guaranteed_containers = num_containers;
    }

    pub fn num_opportunistic_containers(&self) -> u32 {
        self.num_opportunistic_containers
    }

    pub fn set_num_opportunistic_containers(&mut self, num_containers: u32) {
        self.num_opportunistic_containers = num_containers;
    }

    /// Total containers on the node, always recomputed from the two tiers.
    pub fn num_total_containers(&self) -> u32 {
        self.num_guaranteed_containers
            .saturating_add(self.num_opportunistic_containers)
    }

    // ── Health ─────────────────────────────────────────────

    /// Free-form diagnostic text from the node's health check; may be empty.
    pub fn health_report(&self) -> &str {
        &self.health_report
    }

    pub fn set_health_report(&mut self, health_report: impl Into<String>) {
        self.health_report = health_report.into();
    }

    /// Epoch millis at which the last health report was received.
    pub fn last_health_report_time(&self) -> i64 {
        self.last_health_report_time
    }

    pub fn set_last_health_report_time(&mut self, last_health_report: i64) {
        self.last_health_report_time = last_health_report;
    }

    /// The last health report time as a UTC timestamp. `None` if the stored
    /// millis fall outside chrono's representable range.
    pub fn last_health_report(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_health_report_time)
    }

    // ── Labels ─────────────────────────────────────────────

    /// Labels attached to the node. `None` when no labels are known, which
    /// readers must treat differently from an empty set.
    pub fn node_labels(&self) -> Option<&HashSet<String>> {
        self.node_labels.as_ref()
    }

    pub fn set_node_labels(&mut self, node_labels: Option<HashSet<String>>) {
        self.node_labels = node_labels;
    }

    // ── Utilization ────────────────────────────────────────

    /// Utilization of the node as a whole, if the producer reported it.
    pub fn node_utilization(&self) -> Option<ResourceUtilization> {
        self.node_utilization
    }

    pub fn set_node_utilization(&mut self, node_utilization: ResourceUtilization) {
        self.node_utilization = Some(node_utilization);
    }

    /// Aggregated utilization of the containers on the node.
    ///
    /// Reports from producers that never implemented per-container
    /// aggregation carry no value here; the error means "capability absent
    /// on this report variant", not a fault. Fall back to
    /// [`NodeReport::node_utilization`] or omit the value.
    pub fn aggregated_containers_utilization(&self) -> Result<ResourceUtilization> {
        self.aggregated_containers_utilization
            .ok_or(Error::UnsupportedCapability {
                capability: "aggregated_containers_utilization",
            })
    }

    pub fn set_aggregated_containers_utilization(&mut self, utilization: ResourceUtilization) {
        self.aggregated_containers_utilization = Some(utilization);
    }

    // ── Decommissioning ────────────────────────────────────

    /// Grace period in seconds before a draining node is forcibly removed.
    /// `None` means no timeout is configured.
    pub fn decommissioning_timeout(&self) -> Option<u32> {
        self.decommissioning_timeout
    }

    pub fn set_decommissioning_timeout(&mut self, decommissioning_timeout: Option<u32>) {
        self.decommissioning_timeout = decommissioning_timeout;
    }

    /// Cause of the most recent node-state change. Reports that never carried
    /// one read as [`NodeUpdateType::NodeUnusable`], the conservative
    /// assumption.
    pub fn node_update_type(&self) -> NodeUpdateType {
        self.node_update_type.unwrap_or_default()
    }

    pub fn set_node_update_type(&mut self, node_update_type: Option<NodeUpdateType>) {
        self.node_update_type = node_update_type;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_report() -> NodeReport {
        NodeReport::new(
            NodeId::new("node-a", 8042),
            NodeState::Running,
            "node-a:8042",
            "/rack1",
            Resource::new(1024, 1),
            Resource::new(4096, 4),
            2,
            "OK",
            1000,
        )
    }

    #[test]
    fn short_form_defaults_every_optional_field() {
        let report = minimal_report();
        assert_eq!(report.node_labels(), None);
        assert_eq!(report.decommissioning_timeout(), None);
        assert_eq!(report.node_update_type(), NodeUpdateType::NodeUnusable);
        assert_eq!(report.opportunistic_resource_used(), Resource::zero());
        assert_eq!(report.num_opportunistic_containers(), 0);
        assert_eq!(report.node_utilization(), None);
    }

    #[test]
    fn example_scenario() {
        let report = minimal_report();
        assert_eq!(report.num_total_containers(), 2);
        assert_eq!(report.opportunistic_resource_used(), Resource::zero());
        assert_eq!(report.decommissioning_timeout(), None);
    }

    #[test]
    fn total_containers_is_recomputed() {
        let mut report = minimal_report();
        for (g, o) in [(0, 0), (2, 0), (0, 7), (3, 5), (u32::MAX / 2, 1)] {
            report.set_num_guaranteed_containers(g);
            report.set_num_opportunistic_containers(o);
            assert_eq!(report.num_total_containers(), g + o);
        }
    }

    #[test]
    #[allow(deprecated)]
    fn used_aliases_guaranteed_resource_used() {
        let mut report = minimal_report();
        let r = Resource::new(2048, 2);

        report.set_used(r);
        assert_eq!(report.guaranteed_resource_used(), r);

        let r2 = Resource::new(512, 1);
        report.set_guaranteed_resource_used(r2);
        assert_eq!(report.used(), r2);
    }

    #[test]
    fn getters_are_idempotent() {
        let report = minimal_report();
        assert_eq!(report.node_id(), report.node_id());
        assert_eq!(report.node_state(), report.node_state());
        assert_eq!(report.capability(), report.capability());
        assert_eq!(report.num_total_containers(), report.num_total_containers());
        assert_eq!(report.node_update_type(), report.node_update_type());
    }

    #[test]
    fn long_form_round_trips_every_field() {
        let labels: HashSet<String> = ["gpu".to_string(), "ssd".to_string()].into();
        let report = NodeReport::new_extended(
            NodeId::new("node-b", 8042),
            NodeState::Decommissioning,
            "node-b:8042",
            "/rack2",
            Resource::new(2048, 2),
            Resource::new(8192, 8),
            3,
            "disk pressure",
            42_000,
            Some(labels.clone()),
            Some(600),
            Some(NodeUpdateType::NodeDecommissioning),
            Some(Resource::new(512, 1)),
            4,
        );

        assert_eq!(report.node_id(), &NodeId::new("node-b", 8042));
        assert_eq!(report.node_state(), NodeState::Decommissioning);
        assert_eq!(report.http_address(), "node-b:8042");
        assert_eq!(report.rack_name(), "/rack2");
        assert_eq!(report.guaranteed_resource_used(), Resource::new(2048, 2));
        assert_eq!(report.capability(), Resource::new(8192, 8));
        assert_eq!(report.num_guaranteed_containers(), 3);
        assert_eq!(report.health_report(), "disk pressure");
        assert_eq!(report.last_health_report_time(), 42_000);
        assert_eq!(report.node_labels(), Some(&labels));
        assert_eq!(report.decommissioning_timeout(), Some(600));
        assert_eq!(
            report.node_update_type(),
            NodeUpdateType::NodeDecommissioning
        );
        assert_eq!(report.opportunistic_resource_used(), Resource::new(512, 1));
        assert_eq!(report.num_opportunistic_containers(), 4);
        assert_eq!(report.num_total_containers(), 7);
    }

    #[test]
    fn empty_label_set_differs_from_no_labels() {
        let mut report = minimal_report();
        assert_eq!(report.node_labels(), None);

        report.set_node_labels(Some(HashSet::new()));
        assert_eq!(report.node_labels(), Some(&HashSet::new()));

        report.set_node_labels(None);
        assert_eq!(report.node_labels(), None);
    }

    #[test]
    fn aggregated_utilization_unsupported_until_set() {
        let mut report = minimal_report();
        assert_eq!(
            report.aggregated_containers_utilization(),
            Err(Error::UnsupportedCapability {
                capability: "aggregated_containers_utilization",
            })
        );

        let u = ResourceUtilization::new(900, 1800, 0.4);
        report.set_aggregated_containers_utilization(u);
        assert_eq!(report.aggregated_containers_utilization(), Ok(u));
    }

    #[test]
    fn optional_setters_accept_and_clear_values() {
        let mut report = minimal_report();

        report.set_decommissioning_timeout(Some(120));
        assert_eq!(report.decommissioning_timeout(), Some(120));
        report.set_decommissioning_timeout(None);
        assert_eq!(report.decommissioning_timeout(), None);

        report.set_node_update_type(Some(NodeUpdateType::NodeUsable));
        assert_eq!(report.node_update_type(), NodeUpdateType::NodeUsable);
        report.set_node_update_type(None);
        assert_eq!(report.node_update_type(), NodeUpdateType::NodeUnusable);
    }

    #[test]
    fn last_health_report_converts_to_utc() {
        let report = minimal_report();
        let ts = report.last_health_report().unwrap();
        assert_eq!(ts.timestamp_millis(), 1000);
    }
}
