/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of the [`ReplicaPipeline`] type, and the reconciliation of node reports into it.

use std::{slice, time::SystemTime};

use crate::{
    event_bus::EventHandlers,
    events::{AddReplicaEvent, Event, RelocateReplicaEvent},
    types::{
        data_types::{DataVersion, ReplicaId},
        location::Location,
        states::ReplicaState,
    },
};

use super::replica::ReplicaRecord;

/// Ordered collection of the replica records of a block under construction.
///
/// Every record is keyed by a [`ReplicaId`] handed out by the pipeline. Ids are never reused, even
/// across [`reset`](Self::reset)s, so an id held by a caller can only ever resolve to the record it
/// was issued for, or to nothing.
#[derive(Clone, Debug)]
pub struct ReplicaPipeline {
    replicas: Vec<ReplicaRecord>,
    next_id: u64,
}

/// How a call to [`ReplicaPipeline::reconcile`] changed the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A record for the reported location already existed. Its data version was updated.
    Updated(ReplicaId),

    /// The reporting node had a record on another storage unit, `from`. That record was removed and
    /// a new one was appended.
    Relocated { from: Location, replica: ReplicaId },

    /// The reporting node had no record. A new one was appended.
    Added(ReplicaId),
}

impl ReplicaPipeline {
    /// Create a pipeline with one [`ReplicaState::Rbw`] record per target at `data_version`, in the
    /// order of `targets`.
    pub(crate) fn new(data_version: DataVersion, targets: &[Location], capacity: usize) -> Self {
        let mut pipeline = Self {
            replicas: Vec::with_capacity(capacity.max(targets.len())),
            next_id: 0,
        };
        pipeline.extend(data_version, targets);
        pipeline
    }

    /// Replace every record with fresh [`ReplicaState::Rbw`] records at `data_version`, in the order
    /// of `targets`.
    pub(crate) fn reset(&mut self, data_version: DataVersion, targets: &[Location]) {
        self.replicas.clear();
        self.extend(data_version, targets);
    }

    fn extend(&mut self, data_version: DataVersion, targets: &[Location]) {
        for target in targets {
            self.push(data_version, *target, ReplicaState::Rbw);
        }
    }

    fn push(
        &mut self,
        data_version: DataVersion,
        location: Location,
        state: ReplicaState,
    ) -> ReplicaId {
        let id = ReplicaId::new(self.next_id);
        self.next_id += 1;
        self.replicas
            .push(ReplicaRecord::new(id, data_version, location, state));
        id
    }

    /// Get the expected locations of every replica, in pipeline order.
    pub fn expected_locations(&self) -> Vec<Location> {
        self.replicas
            .iter()
            .map(|replica| *replica.expected_location())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.replicas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicas.is_empty()
    }

    /// Get an iterator through the records, in pipeline order.
    pub fn iter(&self) -> slice::Iter<ReplicaRecord> {
        self.replicas.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> slice::IterMut<ReplicaRecord> {
        self.replicas.iter_mut()
    }

    pub fn replicas(&self) -> &[ReplicaRecord] {
        &self.replicas
    }

    pub fn get(&self, id: ReplicaId) -> Option<&ReplicaRecord> {
        self.replicas.iter().find(|replica| replica.id() == id)
    }

    /// Get the current position of the record with `id` in the pipeline.
    pub fn position(&self, id: ReplicaId) -> Option<usize> {
        self.replicas.iter().position(|replica| replica.id() == id)
    }

    /// Merge a replica reported by a node into the pipeline.
    ///
    /// ## `reconcile` logic
    ///
    /// 1. If a record exists for exactly `location`, set its data version to `data_version` and
    ///    return. Nothing else about the record, including its state, changes.
    /// 2. Otherwise, if a record exists for another storage unit on the same node, the node chose to
    ///    place the replica somewhere other than where it was expected. Remove that record, keeping
    ///    the relative order of the others, and continue with step 3.
    /// 3. Append a new record for `location` with `data_version` and `state`.
    pub fn reconcile(
        &mut self,
        location: Location,
        data_version: DataVersion,
        state: ReplicaState,
        event_handlers: &EventHandlers,
    ) -> ReconcileOutcome {
        if let Some(replica) = self
            .replicas
            .iter_mut()
            .find(|replica| replica.expected_location() == &location)
        {
            replica.set_data_version(data_version);
            return ReconcileOutcome::Updated(replica.id());
        }

        let relocated_from = self
            .replicas
            .iter()
            .position(|replica| replica.expected_location().same_node(&location))
            .map(|pos| *self.replicas.remove(pos).expected_location());

        let replica = self.push(data_version, location, state);

        match relocated_from {
            Some(from) => {
                event_handlers.fire_handlers(Event::RelocateReplica(RelocateReplicaEvent {
                    timestamp: SystemTime::now(),
                    from,
                    to: location,
                    data_version,
                }));
                ReconcileOutcome::Relocated { from, replica }
            }
            None => {
                event_handlers.fire_handlers(Event::AddReplica(AddReplicaEvent {
                    timestamp: SystemTime::now(),
                    location,
                    data_version,
                }));
                ReconcileOutcome::Added(replica)
            }
        }
    }

    /// Get the records whose data version is not `data_version`, in pipeline order. The pipeline
    /// itself is left unchanged.
    pub fn stale_replicas(&self, data_version: DataVersion) -> Vec<&ReplicaRecord> {
        self.replicas
            .iter()
            .filter(|replica| replica.data_version() != data_version)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::data_types::{NodeId, StorageId};

    fn location(node: u8, storage: u8) -> Location {
        Location::new(NodeId::new([node; 16]), StorageId::new([storage; 16]))
    }

    fn pipeline_of(targets: &[Location]) -> ReplicaPipeline {
        ReplicaPipeline::new(DataVersion::new(5), targets, 3)
    }

    #[test]
    fn reconcile_known_location_updates_version_in_place() {
        let targets = [location(1, 1), location(2, 2), location(3, 3)];
        let mut pipeline = pipeline_of(&targets);
        let before = pipeline.replicas().to_vec();

        let outcome = pipeline.reconcile(
            location(2, 2),
            DataVersion::new(6),
            ReplicaState::Finalized,
            &EventHandlers::none(),
        );

        assert_eq!(outcome, ReconcileOutcome::Updated(before[1].id()));
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.expected_locations(), targets.to_vec());
        assert_eq!(pipeline.replicas()[1].data_version(), DataVersion::new(6));
        // The reported state is not recorded for a known location.
        assert_eq!(pipeline.replicas()[1].state(), ReplicaState::Rbw);
        assert_eq!(pipeline.replicas()[0], before[0]);
        assert_eq!(pipeline.replicas()[2], before[2]);
    }

    #[test]
    fn reconcile_same_node_other_storage_replaces_record() {
        let mut pipeline = pipeline_of(&[location(1, 1), location(2, 2), location(3, 3)]);
        let old_id = pipeline.replicas()[0].id();

        let outcome = pipeline.reconcile(
            location(1, 9),
            DataVersion::new(5),
            ReplicaState::Rbw,
            &EventHandlers::none(),
        );

        let new_id = match outcome {
            ReconcileOutcome::Relocated { from, replica } => {
                assert_eq!(from, location(1, 1));
                replica
            }
            other => panic!("expected a relocation, got {:?}", other),
        };
        assert_eq!(pipeline.len(), 3);
        assert_eq!(
            pipeline.expected_locations(),
            vec![location(2, 2), location(3, 3), location(1, 9)]
        );
        assert!(pipeline.get(old_id).is_none());
        assert_eq!(pipeline.position(new_id), Some(2));
        assert!(!pipeline.get(new_id).unwrap().chosen_as_primary());
    }

    #[test]
    fn reconcile_new_node_appends() {
        let mut pipeline = pipeline_of(&[location(1, 1), location(2, 2)]);

        let outcome = pipeline.reconcile(
            location(4, 4),
            DataVersion::new(3),
            ReplicaState::Temporary,
            &EventHandlers::none(),
        );

        assert!(matches!(outcome, ReconcileOutcome::Added(_)));
        assert_eq!(pipeline.len(), 3);
        let last = &pipeline.replicas()[2];
        assert_eq!(last.expected_location(), &location(4, 4));
        assert_eq!(last.data_version(), DataVersion::new(3));
        assert_eq!(last.state(), ReplicaState::Temporary);
    }

    #[test]
    fn stale_replicas_preserves_order() {
        let mut pipeline = pipeline_of(&[location(1, 1), location(2, 2), location(3, 3), location(4, 4)]);
        let handlers = EventHandlers::none();
        pipeline.reconcile(location(2, 2), DataVersion::new(7), ReplicaState::Rbw, &handlers);
        pipeline.reconcile(location(4, 4), DataVersion::new(7), ReplicaState::Rbw, &handlers);

        let stale: Vec<Location> = pipeline
            .stale_replicas(DataVersion::new(7))
            .into_iter()
            .map(|replica| *replica.expected_location())
            .collect();
        assert_eq!(stale, vec![location(1, 1), location(3, 3)]);

        assert!(pipeline.stale_replicas(DataVersion::new(5)).len() == 2);
        assert_eq!(pipeline.stale_replicas(DataVersion::new(9)).len(), 4);
        assert_eq!(pipeline.len(), 4);
    }

    #[test]
    fn reset_issues_fresh_ids() {
        let mut pipeline = pipeline_of(&[location(1, 1), location(2, 2)]);
        let old_ids: Vec<ReplicaId> = pipeline.iter().map(|replica| replica.id()).collect();

        pipeline.reset(DataVersion::new(8), &[location(2, 2), location(3, 3)]);

        assert_eq!(pipeline.expected_locations(), vec![location(2, 2), location(3, 3)]);
        assert!(pipeline.iter().all(|replica| replica.data_version() == DataVersion::new(8)));
        assert!(pipeline.iter().all(|replica| !old_ids.contains(&replica.id())));
    }
}
