/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of the [`ConstructionState`] type and its operations.

use std::{
    fmt::{self, Display, Formatter},
    time::SystemTime,
};

use crate::{
    config::Configuration,
    event_bus::EventHandlers,
    events::{Event, NoReplicasEvent, StartRecoveryEvent},
    pipeline::{ReconcileOutcome, ReplicaPipeline, ReplicaRecord},
    recovery::{
        election::select_primary, NodeLiveness, RecoveryCommand, RecoveryCommandSink,
        RecoveryOutcome,
    },
    types::{
        data_types::{Block, DataVersion, RecoveryId, ReplicaId},
        location::Location,
        states::{BlockUCState, ReplicaState},
    },
};

use super::errors::ConstructionError;

/// Replication factor assumed by [`ConstructionState::new`] when sizing the pipeline.
const DEFAULT_REPLICATION: usize = 3;

/// The in-memory state of one block under construction. See the [module docs](super).
#[derive(Clone, Debug)]
pub struct ConstructionState {
    state: BlockUCState,
    pipeline: ReplicaPipeline,
    primary: Option<ReplicaId>,
    recovery_id: RecoveryId,
    truncate_block: Option<Block>,
}

impl ConstructionState {
    /// Create the construction state of a block that is about to be written to `targets`, in
    /// pipeline order. Every replica starts as [`ReplicaState::Rbw`] at `data_version`, and none has
    /// been chosen as a recovery primary.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::CompleteState`] if `state` is [`BlockUCState::Complete`].
    pub fn new(
        state: BlockUCState,
        data_version: DataVersion,
        targets: &[Location],
    ) -> Result<Self, ConstructionError> {
        Self::with_replication(state, data_version, targets, DEFAULT_REPLICATION)
    }

    /// Like [`new`](Self::new), but sizes the pipeline after `config.replication`.
    pub fn with_config(
        config: &Configuration,
        state: BlockUCState,
        data_version: DataVersion,
        targets: &[Location],
    ) -> Result<Self, ConstructionError> {
        Self::with_replication(state, data_version, targets, config.replication)
    }

    fn with_replication(
        state: BlockUCState,
        data_version: DataVersion,
        targets: &[Location],
        replication: usize,
    ) -> Result<Self, ConstructionError> {
        if state == BlockUCState::Complete {
            return Err(ConstructionError::CompleteState);
        }

        Ok(Self {
            state,
            pipeline: ReplicaPipeline::new(data_version, targets, replication),
            primary: None,
            recovery_id: RecoveryId::default(),
            truncate_block: None,
        })
    }

    /// Replace the whole pipeline with fresh records at `data_version`, in the order of `targets`.
    ///
    /// Used when the writer rebuilds its pipeline while still writing. The recovery primary, if
    /// any, no longer names a record after this call.
    pub fn reset_expected_locations(&mut self, data_version: DataVersion, targets: &[Location]) {
        self.pipeline.reset(data_version, targets);
    }

    /// Get the expected locations of the replicas, in pipeline order.
    pub fn expected_locations(&self) -> Vec<Location> {
        self.pipeline.expected_locations()
    }

    pub fn num_expected_locations(&self) -> usize {
        self.pipeline.len()
    }

    pub fn block_uc_state(&self) -> BlockUCState {
        self.state
    }

    pub(crate) fn set_block_uc_state(&mut self, state: BlockUCState) {
        self.state = state
    }

    /// The recovery id of the latest recovery attempt, or 0 if recovery never began.
    pub fn recovery_id(&self) -> RecoveryId {
        self.recovery_id
    }

    /// The block to copy from, if this block was created by a copy-on-write truncate.
    pub fn truncate_block(&self) -> Option<&Block> {
        self.truncate_block.as_ref()
    }

    pub fn set_truncate_block(&mut self, truncate_block: Option<Block>) {
        self.truncate_block = truncate_block
    }

    /// Set the state to [`BlockUCState::Committed`].
    ///
    /// This overwrites whatever the state was before, including [`BlockUCState::UnderRecovery`]. In
    /// that case the recovery id and primary are kept, but the block no longer reports itself as
    /// being recovered.
    pub fn commit(&mut self) {
        self.set_block_uc_state(BlockUCState::Committed)
    }

    pub fn pipeline(&self) -> &ReplicaPipeline {
        &self.pipeline
    }

    /// Get the replica records, in pipeline order.
    pub fn replicas(&self) -> &[ReplicaRecord] {
        self.pipeline.replicas()
    }

    /// The replica chosen as primary by the latest recovery attempt, if one was chosen and is still
    /// in the pipeline.
    pub fn primary(&self) -> Option<&ReplicaRecord> {
        self.primary.and_then(|id| self.pipeline.get(id))
    }

    /// The current position in the pipeline of the replica returned by [`primary`](Self::primary).
    pub fn primary_index(&self) -> Option<usize> {
        self.primary.and_then(|id| self.pipeline.position(id))
    }

    /// Merge a replica reported by a node into the pipeline. See [`ReplicaPipeline::reconcile`].
    pub fn reconcile_replica(
        &mut self,
        location: Location,
        data_version: DataVersion,
        state: ReplicaState,
        event_handlers: &EventHandlers,
    ) -> ReconcileOutcome {
        self.pipeline
            .reconcile(location, data_version, state, event_handlers)
    }

    /// Get the replicas that did not reach `data_version`, in pipeline order.
    pub fn stale_replicas(&self, data_version: DataVersion) -> Vec<&ReplicaRecord> {
        self.pipeline.stale_replicas(data_version)
    }

    /// Start a recovery attempt identified by `recovery_id`, and hand its recovery command to a newly
    /// chosen primary.
    ///
    /// ## `begin_recovery` logic
    ///
    /// 1. The state becomes [`BlockUCState::UnderRecovery`] and the recovery id becomes
    ///    `recovery_id`, whatever the state was before.
    /// 2. If the pipeline is empty, a [`NoReplicasEvent`] is emitted and no primary is chosen.
    /// 3. Otherwise a primary is chosen with [`select_primary`]. If there is one, it is marked as
    ///    chosen, and a [`RecoveryCommand`] for it is put into `commands`.
    ///
    /// The primary of any earlier attempt is forgotten in every case.
    ///
    /// `liveness` must be a snapshot taken under the same lock as this call. It is consulted only
    /// while choosing the primary.
    pub fn begin_recovery<L, S>(
        &mut self,
        block: &Block,
        recovery_id: RecoveryId,
        liveness: &L,
        commands: &mut S,
        event_handlers: &EventHandlers,
    ) -> RecoveryOutcome
    where
        L: NodeLiveness + ?Sized,
        S: RecoveryCommandSink + ?Sized,
    {
        self.set_block_uc_state(BlockUCState::UnderRecovery);
        self.recovery_id = recovery_id;
        self.primary = None;

        if self.pipeline.is_empty() {
            event_handlers.fire_handlers(Event::NoReplicas(NoReplicasEvent {
                timestamp: SystemTime::now(),
                block: *block,
                recovery_id,
            }));
            return RecoveryOutcome::NoReplicas;
        }

        let Some(primary) = select_primary(&mut self.pipeline, liveness) else {
            return RecoveryOutcome::NoLiveReplica;
        };

        let Some((index, replica)) = self
            .pipeline
            .iter_mut()
            .enumerate()
            .find(|(_, replica)| replica.id() == primary)
        else {
            return RecoveryOutcome::NoLiveReplica;
        };
        replica.set_chosen_as_primary(true);
        let location = *replica.expected_location();
        self.primary = Some(primary);

        commands.add_block_to_be_recovered(
            location,
            RecoveryCommand {
                block: *block,
                recovery_id,
                locations: self.pipeline.expected_locations(),
                truncate_block: self.truncate_block,
            },
        );

        event_handlers.fire_handlers(Event::StartRecovery(StartRecoveryEvent {
            timestamp: SystemTime::now(),
            block: *block,
            recovery_id,
            primary: location,
            primary_index: index,
        }));

        RecoveryOutcome::PrimaryChosen {
            replica: primary,
            index,
            location,
        }
    }
}

impl Display for ConstructionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{UCState={}, truncateBlock=", self.state)?;
        match &self.truncate_block {
            Some(block) => write!(f, "{}", block)?,
            None => f.write_str("none")?,
        }
        f.write_str(", primaryNodeIndex=")?;
        match self.primary_index() {
            Some(index) => write!(f, "{}", index)?,
            None => f.write_str("-1")?,
        }
        f.write_str(", replicas=[")?;
        for (i, replica) in self.pipeline.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", replica)?;
        }
        f.write_str("]}")
    }
}
