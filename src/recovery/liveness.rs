/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Facts about storage nodes that recovery needs, but that are owned by the cluster layer.

use std::collections::HashMap;

use crate::types::data_types::{MonotonicTime, NodeId};

/// Methods through which recovery learns whether a node is alive, and how recently it was heard from.
///
/// Implementations must answer from a consistent snapshot for the whole of a single
/// [`begin_recovery`](crate::construction::ConstructionState::begin_recovery) call.
pub trait NodeLiveness {
    fn is_alive(&self, node: &NodeId) -> bool;

    /// The monotonic time at which `node` was last confirmed alive.
    fn last_update(&self, node: &NodeId) -> MonotonicTime;
}

/// What the cluster layer knew about a node when a [`LivenessSnapshot`] was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStatus {
    pub alive: bool,
    pub last_update: MonotonicTime,
}

impl NodeStatus {
    pub const fn alive(last_update: MonotonicTime) -> Self {
        Self {
            alive: true,
            last_update,
        }
    }

    pub const fn dead(last_update: MonotonicTime) -> Self {
        Self {
            alive: false,
            last_update,
        }
    }
}

/// A [`NodeLiveness`] backed by a copy of the node statuses taken under the namespace lock.
///
/// Nodes missing from the snapshot are reported dead, last heard from at time 0.
#[derive(Clone, Debug, Default)]
pub struct LivenessSnapshot {
    statuses: HashMap<NodeId, NodeStatus>,
}

impl LivenessSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, node: NodeId, status: NodeStatus) {
        self.statuses.insert(node, status);
    }

    pub fn get(&self, node: &NodeId) -> Option<&NodeStatus> {
        self.statuses.get(node)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl FromIterator<(NodeId, NodeStatus)> for LivenessSnapshot {
    fn from_iter<T: IntoIterator<Item = (NodeId, NodeStatus)>>(iter: T) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

impl NodeLiveness for LivenessSnapshot {
    fn is_alive(&self, node: &NodeId) -> bool {
        self.statuses.get(node).map_or(false, |status| status.alive)
    }

    fn last_update(&self, node: &NodeId) -> MonotonicTime {
        self.statuses
            .get(node)
            .map_or(MonotonicTime::default(), |status| status.last_update)
    }
}
