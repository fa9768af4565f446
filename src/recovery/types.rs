/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions of types specific to recovery.

use std::sync::mpsc::Sender;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::types::{
    data_types::{Block, RecoveryId, ReplicaId},
    location::Location,
};

/// What the primary's node needs in order to drive a recovery.
///
/// Serializable with borsh so that the heartbeat layer can ship it to the node as-is.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RecoveryCommand {
    /// The block to recover, at the data version it had when recovery began.
    pub block: Block,

    /// The data version the block will have once recovered.
    pub recovery_id: RecoveryId,

    /// Expected locations of every replica, in pipeline order, the primary's included.
    pub locations: Vec<Location>,

    /// The block to copy from, if recovery finishes a copy-on-write truncate.
    pub truncate_block: Option<Block>,
}

/// Receives the recovery command of a newly chosen primary.
///
/// Implementations must not block: the command is only queued here, and is delivered to `primary`'s
/// node later, with its next heartbeat response.
pub trait RecoveryCommandSink {
    fn add_block_to_be_recovered(&mut self, primary: Location, command: RecoveryCommand);
}

impl RecoveryCommandSink for Vec<(Location, RecoveryCommand)> {
    fn add_block_to_be_recovered(&mut self, primary: Location, command: RecoveryCommand) {
        self.push((primary, command))
    }
}

impl RecoveryCommandSink for Sender<(Location, RecoveryCommand)> {
    fn add_block_to_be_recovered(&mut self, primary: Location, command: RecoveryCommand) {
        if let Err(err) = self.send((primary, command)) {
            let (primary, command) = err.0;
            log::warn!(
                "Dropping recovery command for {} (recovery id {}) to {}: receiver disconnected",
                command.block,
                command.recovery_id,
                primary
            );
        }
    }
}

/// Result of a call to [`begin_recovery`](crate::construction::ConstructionState::begin_recovery).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// A primary was chosen and its recovery command was queued.
    PrimaryChosen {
        replica: ReplicaId,
        index: usize,
        location: Location,
    },

    /// The block has no replicas. Nothing can recover it.
    NoReplicas,

    /// No replica's node is alive. The caller should retry later, with the same or a new recovery
    /// id.
    NoLiveReplica,
}

impl RecoveryOutcome {
    /// The location of the chosen primary, if one was chosen.
    pub fn primary(&self) -> Option<&Location> {
        match self {
            RecoveryOutcome::PrimaryChosen { location, .. } => Some(location),
            RecoveryOutcome::NoReplicas | RecoveryOutcome::NoLiveReplica => None,
        }
    }
}
