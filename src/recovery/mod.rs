/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Election of the replica that coordinates the recovery of a block whose writer went away.
//!
//! When a writer's lease expires, or a truncate needs a block finalized at a given length, the
//! metadata service picks one replica, the *primary*, and asks its node to synchronize every replica
//! to a common length and a new [data version](crate::types::data_types::DataVersion). Deciding
//! *when* to do this is up to the caller. This module decides *who*.
//!
//! ## Inputs
//!
//! Recovery reads two facts about each replica's node that blockuc-rs does not own: whether the node
//! is alive, and when it was last heard from. Both are asked of a [`NodeLiveness`] that the caller
//! passes in for the duration of a single call. The primary's node is then handed a
//! [`RecoveryCommand`] through a [`RecoveryCommandSink`]. Delivering that command is, again, the
//! caller's business.
//!
//! ## Choosing the primary
//!
//! See [`election::select_primary`].

pub mod election;

pub mod liveness;
pub use liveness::{LivenessSnapshot, NodeLiveness, NodeStatus};

pub mod types;
pub use types::{RecoveryCommand, RecoveryCommandSink, RecoveryOutcome};
