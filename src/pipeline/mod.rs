/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The replica pipeline of a block under construction.
//!
//! ## Pipeline order
//!
//! When a block is allocated, the placement layer picks an ordered list of target
//! [locations](crate::types::location::Location). The writer pushes data through those targets in
//! that order, so the order of the records in a [`ReplicaPipeline`] is the write path order. It is
//! fixed at creation and only ever changes by appending, or by the single replace-on-relocation case
//! described in [`ReplicaPipeline::reconcile`].
//!
//! ## Node granularity
//!
//! Locations name storage units, but a node is free to place a replica on whichever of its own
//! storage units it likes. The pipeline therefore holds at most one record per node: a report from a
//! node on an unexpected storage unit replaces that node's old record rather than adding a second one.
//!
//! ## Staleness
//!
//! Once a recovery finishes, replicas whose recorded [data version](crate::types::data_types::DataVersion)
//! differs from the recovered version never caught up. [`ReplicaPipeline::stale_replicas`] lists them
//! so that the caller can invalidate them.

pub mod registry;
pub use registry::{ReconcileOutcome, ReplicaPipeline};

pub mod replica;
pub use replica::ReplicaRecord;
