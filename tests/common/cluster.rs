//! A stand-in for the cluster layer: a set of storage nodes, each with storage units, a liveness
//! status, and a queue of pending recovery commands.

use std::collections::HashMap;

use blockuc_rs::{
    recovery::{LivenessSnapshot, NodeStatus, RecoveryCommand, RecoveryCommandSink},
    types::{
        data_types::{MonotonicTime, NodeId, StorageId},
        location::Location,
    },
};

pub(crate) struct Cluster {
    statuses: HashMap<NodeId, NodeStatus>,
    pending_recoveries: HashMap<NodeId, Vec<(Location, RecoveryCommand)>>,
}

impl Cluster {
    /// A cluster in which no node has sent a heartbeat yet. Such nodes count as dead.
    pub(crate) fn new() -> Self {
        Self {
            statuses: HashMap::new(),
            pending_recoveries: HashMap::new(),
        }
    }

    pub(crate) fn node(n: u8) -> NodeId {
        NodeId::new([n; 16])
    }

    /// Storage unit `s` of node `n`.
    pub(crate) fn location(n: u8, s: u8) -> Location {
        let mut storage = [n; 16];
        storage[15] = s;
        Location::new(Self::node(n), StorageId::new(storage))
    }

    pub(crate) fn heartbeat(&mut self, n: u8, at: u64) {
        self.statuses
            .insert(Self::node(n), NodeStatus::alive(MonotonicTime::new(at)));
    }

    pub(crate) fn kill(&mut self, n: u8) {
        let status = self
            .statuses
            .entry(Self::node(n))
            .or_insert(NodeStatus::dead(MonotonicTime::new(0)));
        status.alive = false;
    }

    /// A copy of every node's status, as the metadata service would take under its lock.
    pub(crate) fn snapshot(&self) -> LivenessSnapshot {
        self.statuses
            .iter()
            .map(|(node, status)| (*node, *status))
            .collect()
    }

    pub(crate) fn pending_recoveries(&self, n: u8) -> &[(Location, RecoveryCommand)] {
        self.pending_recoveries
            .get(&Self::node(n))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn total_pending_recoveries(&self) -> usize {
        self.pending_recoveries.values().map(Vec::len).sum()
    }
}

impl RecoveryCommandSink for Cluster {
    fn add_block_to_be_recovered(&mut self, primary: Location, command: RecoveryCommand) {
        self.pending_recoveries
            .entry(*primary.node())
            .or_default()
            .push((primary, command));
    }
}
