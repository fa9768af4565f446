/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Registry of event handlers, and the functions that fire them.

use crate::config::Configuration;
use crate::events::*;
use crate::logging::Logger;

pub type HandlerPtr<T> = Box<dyn Fn(&T) + Send>;

/// The handlers that get called when an [`Event`] is emitted.
///
/// `EventHandlers` is passed by reference into every operation that emits events. It is never
/// stored in, or reached through, global state, so a block under construction can be driven without
/// any logging implementation installed.
#[derive(Default)]
pub struct EventHandlers {
    pub(crate) start_recovery_handlers: Vec<HandlerPtr<StartRecoveryEvent>>,
    pub(crate) no_replicas_handlers: Vec<HandlerPtr<NoReplicasEvent>>,
    pub(crate) relocate_replica_handlers: Vec<HandlerPtr<RelocateReplicaEvent>>,
    pub(crate) add_replica_handlers: Vec<HandlerPtr<AddReplicaEvent>>,
}

impl EventHandlers {
    /// Create a set of handlers containing the default loggers of every event if
    /// `config.log_events` is set, or no handlers otherwise.
    pub fn new(config: &Configuration) -> Self {
        let mut handlers = Self::default();
        if config.log_events {
            handlers.start_recovery_handlers.push(StartRecoveryEvent::get_logger());
            handlers.no_replicas_handlers.push(NoReplicasEvent::get_logger());
            handlers.relocate_replica_handlers.push(RelocateReplicaEvent::get_logger());
            handlers.add_replica_handlers.push(AddReplicaEvent::get_logger());
        }
        handlers
    }

    /// Handlers that do nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn add_start_recovery_handler(&mut self, handler: HandlerPtr<StartRecoveryEvent>) {
        self.start_recovery_handlers.push(handler)
    }

    pub fn add_no_replicas_handler(&mut self, handler: HandlerPtr<NoReplicasEvent>) {
        self.no_replicas_handlers.push(handler)
    }

    pub fn add_relocate_replica_handler(&mut self, handler: HandlerPtr<RelocateReplicaEvent>) {
        self.relocate_replica_handlers.push(handler)
    }

    pub fn add_add_replica_handler(&mut self, handler: HandlerPtr<AddReplicaEvent>) {
        self.add_replica_handlers.push(handler)
    }

    pub fn fire_handlers(&self, event: Event) {
        match event {
            Event::StartRecovery(start_recovery_event) => self
                .start_recovery_handlers
                .iter()
                .for_each(|handler| handler(&start_recovery_event)),

            Event::NoReplicas(no_replicas_event) => self
                .no_replicas_handlers
                .iter()
                .for_each(|handler| handler(&no_replicas_event)),

            Event::RelocateReplica(relocate_replica_event) => self
                .relocate_replica_handlers
                .iter()
                .for_each(|handler| handler(&relocate_replica_event)),

            Event::AddReplica(add_replica_event) => self
                .add_replica_handlers
                .iter()
                .for_each(|handler| handler(&add_replica_event)),
        }
    }
}
