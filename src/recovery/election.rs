/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The function that chooses a recovery primary among the replicas of a block.

use crate::{
    pipeline::ReplicaPipeline,
    types::data_types::{MonotonicTime, ReplicaId},
};

use super::liveness::NodeLiveness;

/// Choose the replica whose node should coordinate the next recovery attempt of a block.
///
/// ## `select_primary` logic
///
/// 1. If every replica on a live node has already been
///    [chosen as primary](crate::pipeline::ReplicaRecord::chosen_as_primary) by some earlier attempt,
///    clear that flag on *every* replica, live or not. Each reachable node then gets another turn,
///    so recovery cannot run out of candidates while any node is up. This also holds, vacuously,
///    when no node is alive.
/// 2. Among the replicas on live nodes that have not been chosen yet, return the one whose node was
///    most recently confirmed alive. On equal times, the replica earliest in pipeline order wins.
///
/// Returns `None` if-and-only-if no replica is on a live node.
///
/// This function does not mark the returned replica as chosen; the caller does that once it has
/// committed to the choice.
pub fn select_primary<L>(pipeline: &mut ReplicaPipeline, liveness: &L) -> Option<ReplicaId>
where
    L: NodeLiveness + ?Sized,
{
    let all_live_replicas_tried = pipeline
        .iter()
        .filter(|replica| liveness.is_alive(replica.expected_location().node()))
        .all(|replica| replica.chosen_as_primary());

    if all_live_replicas_tried {
        pipeline
            .iter_mut()
            .for_each(|replica| replica.set_chosen_as_primary(false));
    }

    let mut primary: Option<(ReplicaId, MonotonicTime)> = None;
    for replica in pipeline.iter() {
        let node = replica.expected_location().node();
        if !liveness.is_alive(node) || replica.chosen_as_primary() {
            continue;
        }

        let last_update = liveness.last_update(node);
        // Strictly greater, so that earlier replicas win ties.
        if primary.map_or(true, |(_, most_recent)| last_update > most_recent) {
            primary = Some((replica.id(), last_update));
        }
    }

    primary.map(|(replica, _)| replica)
}
