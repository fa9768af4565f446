/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that are used across multiple components of blockuc-rs.
//!
//! Types specific to a single component live in that component's module, e.g.,
//! [`crate::recovery::RecoveryCommand`].

pub mod data_types;

pub mod location;

pub mod states;
