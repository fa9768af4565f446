/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of [`ConstructionError`].

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Enumerates the ways in which creating a [`ConstructionState`](super::ConstructionState) can fail.
///
/// Every variant is a precondition violation by the caller. None of them can be recovered from by
/// retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    /// An attempt was made to create the construction state of a block that is already complete.
    CompleteState,
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::CompleteState => {
                f.write_str("a block under construction cannot be in the COMPLETE state")
            }
        }
    }
}

impl Error for ConstructionError {}
