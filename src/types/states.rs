/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Lifecycle states of blocks and of their replicas.

use std::fmt::{self, Display, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};

/// Lifecycle state of a block that is still being written.
///
/// ## Transitions
///
/// ```text
/// UnderConstruction --commit--> Committed
/// UnderConstruction --begin_recovery--> UnderRecovery
/// Committed --begin_recovery--> UnderRecovery
/// UnderRecovery --begin_recovery--> UnderRecovery
/// ```
///
/// `Complete` is listed for completeness only: a block in that state no longer has a
/// [`ConstructionState`](crate::construction::ConstructionState), and attempting to create one
/// fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub enum BlockUCState {
    /// The block is being written by a client.
    UnderConstruction,

    /// The block is being forcibly finalized by a recovery primary.
    UnderRecovery,

    /// The writer has declared the block done, but not enough replicas have reported it finalized.
    Committed,

    /// The block is finalized. Terminal.
    Complete,
}

impl Display for BlockUCState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockUCState::UnderConstruction => "UNDER_CONSTRUCTION",
            BlockUCState::UnderRecovery => "UNDER_RECOVERY",
            BlockUCState::Committed => "COMMITTED",
            BlockUCState::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// State of a replica as reported by the node that holds it. Recorded but never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub enum ReplicaState {
    /// Finalized replica.
    Finalized,

    /// Replica being written.
    Rbw,

    /// Replica waiting to be recovered.
    Rwr,

    /// Replica under recovery.
    Rur,

    /// Temporary replica, created for replication or relocation only.
    Temporary,
}

impl Display for ReplicaState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplicaState::Finalized => "FINALIZED",
            ReplicaState::Rbw => "RBW",
            ReplicaState::Rwr => "RWR",
            ReplicaState::Rur => "RUR",
            ReplicaState::Temporary => "TEMPORARY",
        };
        f.write_str(name)
    }
}
