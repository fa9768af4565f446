/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of the [`Location`] type.

use std::fmt::{self, Display, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};

use super::data_types::{NodeId, StorageId};

/// Where a replica is expected to live: a storage unit, and the node that owns it.
///
/// A `Location` is a lookup key into state owned by the cluster layer. It carries no liveness or
/// capacity information itself; those are asked of a [`NodeLiveness`](crate::recovery::NodeLiveness)
/// at the time they are needed.
///
/// Two locations are equal if-and-only-if they name the same storage unit on the same node. Use
/// [`Location::same_node`] to compare at node granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct Location {
    node: NodeId,
    storage: StorageId,
}

impl Location {
    pub const fn new(node: NodeId, storage: StorageId) -> Self {
        Self { node, storage }
    }

    /// The node that owns this storage unit.
    pub const fn node(&self) -> &NodeId {
        &self.node
    }

    pub const fn storage(&self) -> &StorageId {
        &self.storage
    }

    /// Whether `self` and `other` are storage units owned by the same node. True also when they are
    /// the same storage unit.
    pub fn same_node(&self, other: &Location) -> bool {
        self.node == other.node
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.storage, self.node)
    }
}
