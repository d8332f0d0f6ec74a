// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Arrival, SearchTree};
use crate::{Edge, Graph, VertexId};

/// A candidate arrival at `at`, coming over an edge from `from`.
#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: VertexId,
    from: VertexId,
    distance: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.distance.eq(&other.distance)
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as shorter distances are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other.distance.cmp(&self.distance)
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to compute the shortest distances from `from_id` to every vertex reachable from it.
///
/// The search never stops early - the returned [SearchTree] always covers
/// every reachable vertex. Vertices absent from the tree are unreachable.
///
/// Instead of decreasing priorities of queued vertices, every edge out of a finalized
/// vertex pushes a new candidate into the queue. Candidates for already-finalized vertices
/// are discarded when popped; since all weights are non-negative, the first candidate
/// popped for any vertex always carries its shortest distance.
///
/// Among routes of equal distance, which predecessor gets recorded is unspecified.
///
/// Panics if the total distance of any route overflows [u64]; see [Graph::add_edge].
pub fn shortest_paths(g: &Graph, from_id: VertexId) -> SearchTree {
    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut tree = SearchTree::new(from_id);
    let mut stale: usize = 0;

    queue.push(QueueItem {
        at: from_id,
        from: from_id,
        distance: 0,
    });

    while let Some(item) = queue.pop() {
        // Vertices are finalized the first time they are popped; later candidates are stale
        if tree.contains(item.at) {
            stale += 1;
            continue;
        }

        tree.insert(
            item.at,
            Arrival {
                predecessor: item.from,
                distance: item.distance,
            },
        );

        for &Edge {
            to: neighbor_id,
            weight,
        } in g.neighbors(item.at)
        {
            queue.push(QueueItem {
                at: neighbor_id,
                from: item.at,
                distance: item
                    .distance
                    .checked_add(weight)
                    .expect("route distance overflows u64 - edge weights are too large"),
            });
        }
    }

    log::trace!(
        "search from {}: {} vertices finalized, {} stale candidates discarded",
        from_id,
        tree.len(),
        stale,
    );

    return tree;
}
