/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of the [`ReplicaRecord`] type.

use std::fmt::{self, Display, Formatter};

use crate::types::{
    data_types::{DataVersion, ReplicaId},
    location::Location,
    states::ReplicaState,
};

/// What the metadata service knows about one replica of a block under construction.
///
/// The data version and the state are as last reported by the node holding the replica. It is
/// expected, but not guaranteed, that the node actually has it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicaRecord {
    id: ReplicaId,
    data_version: DataVersion,
    expected_location: Location,
    state: ReplicaState,
    chosen_as_primary: bool,
}

impl ReplicaRecord {
    pub(crate) fn new(
        id: ReplicaId,
        data_version: DataVersion,
        expected_location: Location,
        state: ReplicaState,
    ) -> Self {
        Self {
            id,
            data_version,
            expected_location,
            state,
            chosen_as_primary: false,
        }
    }

    /// Key of this record within its pipeline. Stable across removals of other records.
    pub fn id(&self) -> ReplicaId {
        self.id
    }

    pub fn data_version(&self) -> DataVersion {
        self.data_version
    }

    pub(crate) fn set_data_version(&mut self, data_version: DataVersion) {
        self.data_version = data_version
    }

    /// Where the replica is expected to be.
    pub fn expected_location(&self) -> &Location {
        &self.expected_location
    }

    /// State of the replica as reported by its node.
    pub fn state(&self) -> ReplicaState {
        self.state
    }

    /// Whether this replica was chosen as recovery primary in the current or an earlier attempt.
    pub fn chosen_as_primary(&self) -> bool {
        self.chosen_as_primary
    }

    pub(crate) fn set_chosen_as_primary(&mut self, chosen_as_primary: bool) {
        self.chosen_as_primary = chosen_as_primary
    }
}

impl Display for ReplicaRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ReplicaUC[{}|{}]", self.expected_location, self.state)
    }
}
