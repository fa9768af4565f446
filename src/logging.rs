/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that log out events.
//!
//! The logs defined in this module are printed if the user enabled them via
//! [`Configuration::log_events`](crate::config::Configuration).
//!
//! blockuc-rs logs using the [log](https://docs.rs/log/latest/log/) crate. To get these messages
//! printed onto a terminal or to a file, set up a
//! [logging implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
//!
//! ## Log message format
//!
//! Log messages are CSVs (Comma Separated Values) with at least two values. The first two values are
//! always:
//! 1. The name of the [event](crate::events) in PascalCase (defined in this module as constants).
//! 2. The time the event was emitted (as number of seconds since the Unix Epoch).
//!
//! The rest of the values differ depending on the kind of event. For example, the following snippet
//! is how a [StartRecovery](crate::events::StartRecoveryEvent) is printed:
//!
//! ```text
//! StartRecovery, 1701329264, blk_42_5, 7, [AwMDAwM]AwMDAwM, 2
//! ```
//!
//! In the snippet:
//! - The third value is the block, as `blk_<id>_<data version>`.
//! - The fourth value is the recovery id.
//! - The fifth value is the location of the chosen primary, storage unit first. Storage units and
//!   nodes are printed as the first seven characters of the Base64 encoding of their ids.
//! - The sixth value is the position of the primary in the replica pipeline.

use std::time::SystemTime;

use crate::events::*;

// Names of each event in PascalCase for printing:
pub const START_RECOVERY: &str = "StartRecovery";
pub const NO_REPLICAS: &str = "NoReplicas";
pub const RELOCATE_REPLICA: &str = "RelocateReplica";
pub const ADD_REPLICA: &str = "AddReplica";

/// Implemented by event types. Used to get a closure that logs the event.
pub(crate) trait Logger {
    /// Returns a pointer to the default logging handler for a given event type.
    fn get_logger() -> Box<dyn Fn(&Self) + Send>;
}

impl Logger for StartRecoveryEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |start_recovery_event: &StartRecoveryEvent| {
            log::debug!(
                "{}, {}, {}, {}, {}, {}",
                START_RECOVERY,
                secs_since_unix_epoch(start_recovery_event.timestamp),
                start_recovery_event.block,
                start_recovery_event.recovery_id,
                start_recovery_event.primary,
                start_recovery_event.primary_index
            )
        };
        Box::new(logger)
    }
}

impl Logger for NoReplicasEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |no_replicas_event: &NoReplicasEvent| {
            log::warn!(
                "{}, {}, {}, {}",
                NO_REPLICAS,
                secs_since_unix_epoch(no_replicas_event.timestamp),
                no_replicas_event.block,
                no_replicas_event.recovery_id
            )
        };
        Box::new(logger)
    }
}

impl Logger for RelocateReplicaEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |relocate_replica_event: &RelocateReplicaEvent| {
            log::debug!(
                "{}, {}, {}, {}, {}",
                RELOCATE_REPLICA,
                secs_since_unix_epoch(relocate_replica_event.timestamp),
                relocate_replica_event.from,
                relocate_replica_event.to,
                relocate_replica_event.data_version
            )
        };
        Box::new(logger)
    }
}

impl Logger for AddReplicaEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |add_replica_event: &AddReplicaEvent| {
            log::debug!(
                "{}, {}, {}, {}",
                ADD_REPLICA,
                secs_since_unix_epoch(add_replica_event.timestamp),
                add_replica_event.location,
                add_replica_event.data_version
            )
        };
        Box::new(logger)
    }
}

// Events stamped before the Unix Epoch are printed with time 0.
fn secs_since_unix_epoch(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
