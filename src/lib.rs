/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! blockuc-rs tracks blocks of a replicated, append-oriented file store while they are being written
//! or recovered.
//!
//! Each such block carries a [`ConstructionState`](construction::ConstructionState) that:
//! 1. Records which storage units are expected to hold the block's replicas, in write pipeline
//!    order ([`pipeline`]).
//! 2. Merges the replica reports of storage nodes into that pipeline as the write progresses.
//! 3. Lists the replicas that fell behind a given data version.
//! 4. Chooses a single replica to coordinate the block's recovery when its writer goes away
//!    ([`recovery`]).
//!
//! blockuc-rs does no I/O, no locking, and no scheduling. Heartbeats, lease monitoring, placement,
//! and persistence belong to the metadata service that embeds it. That service hands in
//! [liveness facts](recovery::NodeLiveness) and a [command sink](recovery::RecoveryCommandSink), and
//! receives [events](events) through the [`EventHandlers`](event_bus::EventHandlers) it passes in.

pub mod config;

pub mod construction;

pub mod event_bus;

pub mod events;

pub(crate) mod logging;

pub mod pipeline;

pub mod recovery;

pub mod types;
