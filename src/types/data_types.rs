/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that exist only to store numbers or bytes, and do not have any major "active" behavior.

use std::fmt::{self, Debug, Display, Formatter};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};

/// Number that uniquely identifies a block across the whole file store.
///
/// A block keeps its `BlockId` through every recovery and rewrite; only its
/// [`DataVersion`] changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct BlockId(u64);

impl BlockId {
    /// Create a new `BlockId` with an `int` value.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the `u64` value of this `BlockId`.
    pub const fn int(&self) -> u64 {
        self.0
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "blk_{}", self.0)
    }
}

/// Generation stamp of a block's content.
///
/// Assigned monotonically: every successful recovery or rewrite of a block produces a new version
/// strictly greater than the previous one. Replicas whose recorded version differs from the version
/// being finalized are [stale](crate::pipeline::ReplicaPipeline::stale_replicas).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct DataVersion(u64);

impl DataVersion {
    /// Create a new `DataVersion` with an `int` value.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the `u64` value of this `DataVersion`.
    pub const fn int(&self) -> u64 {
        self.0
    }
}

impl Display for DataVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The generation stamp that a block will carry once the recovery identified by this id succeeds.
///
/// Also used to tell apart overlapping recovery attempts: a node that reports back with an old
/// `RecoveryId` is answering an abandoned attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct RecoveryId(u64);

impl RecoveryId {
    /// Create a new `RecoveryId` with an `int` value.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the `u64` value of this `RecoveryId`.
    pub const fn int(&self) -> u64 {
        self.0
    }

    /// The data version that the recovered block will carry.
    pub const fn data_version(&self) -> DataVersion {
        DataVersion::new(self.0)
    }
}

impl Display for RecoveryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Reading of a monotonic clock, in milliseconds. Only ever compared with other readings of the
/// same clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicTime(u64);

impl MonotonicTime {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn millis(&self) -> u64 {
        self.0
    }
}

/// Identity of a storage node (the owner of one or more storage units).
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct NodeId([u8; 16]);

impl NodeId {
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", first_seven_base64_chars(&self.0))
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&first_seven_base64_chars(&self.0))
    }
}

/// Identity of a single storage unit (volume) on a storage node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct StorageId([u8; 16]);

impl StorageId {
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl Debug for StorageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "StorageId({})", first_seven_base64_chars(&self.0))
    }
}

impl Display for StorageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&first_seven_base64_chars(&self.0))
    }
}

/// Key of a [replica record](crate::pipeline::ReplicaRecord) within its pipeline.
///
/// Unlike a position in the pipeline, a `ReplicaId` stays valid when other records are removed or
/// appended. Ids are never reused within a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplicaId(u64);

impl ReplicaId {
    pub(crate) const fn new(int: u64) -> Self {
        Self(int)
    }

    pub const fn int(&self) -> u64 {
        self.0
    }
}

/// A block as seen by the metadata service: its identity, its current data version, and its length
/// in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct Block {
    pub id: BlockId,
    pub data_version: DataVersion,
    pub num_bytes: u64,
}

impl Block {
    pub const fn new(id: BlockId, data_version: DataVersion, num_bytes: u64) -> Self {
        Self {
            id,
            data_version,
            num_bytes,
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.data_version)
    }
}

// Get a more readable representation of a bytesequence by base64-encoding it and taking the first 7 characters.
pub(crate) fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}
