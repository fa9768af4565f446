/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions of the events that blockuc-rs emits while mutating a block under construction.
//!
//! An event for a given action indicates that the action has been completed. Events are delivered
//! synchronously, in the caller's thread, to the handlers registered in an
//! [`EventHandlers`](crate::event_bus::EventHandlers).

use std::time::SystemTime;

use crate::types::{
    data_types::{Block, DataVersion, RecoveryId},
    location::Location,
};

/// Enumerates all events that can be emitted.
pub enum Event {
    StartRecovery(StartRecoveryEvent),
    NoReplicas(NoReplicasEvent),
    RelocateReplica(RelocateReplicaEvent),
    AddReplica(AddReplicaEvent),
}

/// A recovery primary was chosen and the recovery command was handed to it.
pub struct StartRecoveryEvent {
    pub timestamp: SystemTime,
    pub block: Block,
    pub recovery_id: RecoveryId,
    pub primary: Location,
    pub primary_index: usize,
}

/// Recovery began on a block that has no replicas to recover from.
pub struct NoReplicasEvent {
    pub timestamp: SystemTime,
    pub block: Block,
    pub recovery_id: RecoveryId,
}

/// A node reported a replica on a different storage unit than the one it was expected on, so the
/// old record was replaced.
pub struct RelocateReplicaEvent {
    pub timestamp: SystemTime,
    pub from: Location,
    pub to: Location,
    pub data_version: DataVersion,
}

/// A node the pipeline did not expect reported a replica, so a new record was appended.
pub struct AddReplicaEvent {
    pub timestamp: SystemTime,
    pub location: Location,
    pub data_version: DataVersion,
}
