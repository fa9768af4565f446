/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The state of a block while it is being written or recovered.
//!
//! A [`ConstructionState`] is attached to a block from the moment a writer allocates it until the
//! block becomes [complete](crate::types::states::BlockUCState::Complete), at which point the owner
//! detaches and drops it. It holds:
//! - The block's [lifecycle state](crate::types::states::BlockUCState).
//! - The block's [replica pipeline](crate::pipeline::ReplicaPipeline).
//! - The [recovery id](crate::types::data_types::RecoveryId) of the latest recovery attempt, and the
//!   [id](crate::types::data_types::ReplicaId) of the replica chosen as that attempt's primary.
//! - The truncate source, for copy-on-write truncates.
//!
//! ## Synchronization
//!
//! `ConstructionState` does no locking of its own. Every mutation must happen while the caller holds
//! the lock over the namespace that owns the block, and any liveness snapshot passed into
//! [`begin_recovery`](ConstructionState::begin_recovery) must have been taken under that same lock.

pub mod errors;
pub use errors::ConstructionError;

pub mod state;
pub use state::ConstructionState;
