/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! User-defined parameters of blockuc-rs.

use typed_builder::TypedBuilder;

/// Stores the user-defined parameters that apply to every block under construction:
/// 1. The "Log Events" flag. If set to `true`, [`EventHandlers::new`](crate::event_bus::EventHandlers::new)
///    installs the default [loggers](crate::logging) for every event.
/// 2. The expected replication factor, used to size newly created replica pipelines. Pipelines are
///    free to grow or shrink beyond it.
///
/// ## Log Events
///
/// blockuc-rs logs using the [log](https://docs.rs/log/latest/log/) crate. To get these messages
/// printed onto a terminal or to a file, set up a [logging
/// implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
#[derive(TypedBuilder, Clone, Debug)]
#[builder(builder_method(doc = "
    Create a builder for building a [Configuration]. On the builder call the following methods to construct a valid [Configuration].

    Required:
    - `.log_events(...)`

    Optional:
    - `.replication(...)` (default: 3)
"))]
pub struct Configuration {
    #[builder(setter(doc = "Enable logging? Required."))]
    pub log_events: bool,
    #[builder(default = 3, setter(doc = "Set the expected number of replicas per block. Optional."))]
    pub replication: usize,
}
