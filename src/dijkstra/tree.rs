// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::VertexId;

/// Records how a vertex was reached in a [SearchTree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arrival {
    /// The previous vertex on the shortest route. The source of the search is its own predecessor.
    pub predecessor: VertexId,

    /// Total weight of the shortest route from the source of the search.
    pub distance: u64,
}

/// Output of [shortest_paths](crate::shortest_paths): the shortest-path tree
/// from a single source vertex to every vertex reachable from it.
///
/// Every recorded predecessor has a recorded distance no greater than
/// its successors (strictly smaller unless the connecting edge has zero weight),
/// so following predecessors always leads back to the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    source: VertexId,
    arrivals: HashMap<VertexId, Arrival>,
}

impl SearchTree {
    pub(super) fn new(source: VertexId) -> Self {
        Self {
            source,
            arrivals: HashMap::default(),
        }
    }

    pub(super) fn insert(&mut self, id: VertexId, arrival: Arrival) {
        debug_assert!(!self.arrivals.contains_key(&id));
        self.arrivals.insert(id, arrival);
    }

    /// Returns the vertex from which the search started.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the number of vertices reachable from the source, including the source itself.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// Returns `true` if no vertices were reached. Never the case for trees
    /// returned by [shortest_paths](crate::shortest_paths), which always contain the source.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Returns `true` if the vertex is reachable from the source.
    pub fn contains(&self, id: VertexId) -> bool {
        self.arrivals.contains_key(&id)
    }

    /// Retrieves the [Arrival] at the provided vertex, or [None] if it is unreachable.
    pub fn get(&self, id: VertexId) -> Option<Arrival> {
        self.arrivals.get(&id).copied()
    }

    /// Retrieves the shortest distance from the source to the provided vertex,
    /// or [None] if it is unreachable.
    pub fn distance(&self, id: VertexId) -> Option<u64> {
        self.arrivals.get(&id).map(|a| a.distance)
    }

    /// Returns an iterator over all reached vertices, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Arrival)> + '_ {
        self.arrivals.iter().map(|(&id, &arrival)| (id, arrival))
    }
}

/// Walks the [SearchTree] back from `to_id` to `from_id`, returning the vertices
/// along the shortest route in order from `from_id` to `to_id`.
///
/// Returns [None] if `to_id` is unreachable. If `from_id == to_id`,
/// the route consists of that single vertex.
///
/// `from_id` must be the [source](SearchTree::source) of the tree, otherwise
/// this function panics.
pub fn reconstruct_path(
    tree: &SearchTree,
    from_id: VertexId,
    to_id: VertexId,
) -> Option<Vec<VertexId>> {
    assert_eq!(
        tree.source(),
        from_id,
        "route must start at the source of the search tree"
    );

    let mut last = to_id;
    let mut path = vec![last];

    while last != from_id {
        // Every vertex in the tree has a predecessor in the tree, so only
        // the initial lookup can fail
        last = tree.get(last)?.predecessor;
        path.push(last);

        // A walk longer than the tree means the predecessors form a cycle
        assert!(path.len() <= tree.len(), "cycle in search tree at {}", last);
    }

    path.reverse();
    return Some(path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(source: VertexId, arrivals: &[(VertexId, VertexId, u64)]) -> SearchTree {
        let mut t = SearchTree::new(source);
        for &(id, predecessor, distance) in arrivals {
            t.insert(id, Arrival { predecessor, distance });
        }
        t
    }

    #[test]
    fn reconstruct() {
        let t = tree(1, &[(1, 1, 0), (2, 1, 5), (3, 2, 8), (4, 1, 2)]);

        assert_eq!(reconstruct_path(&t, 1, 3), Some(vec![1, 2, 3]));
        assert_eq!(reconstruct_path(&t, 1, 4), Some(vec![1, 4]));
        assert_eq!(reconstruct_path(&t, 1, 1), Some(vec![1]));
        assert_eq!(reconstruct_path(&t, 1, 5), None);
    }

    #[test]
    fn accessors() {
        let t = tree(1, &[(1, 1, 0), (2, 1, 5)]);

        assert_eq!(t.source(), 1);
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
        assert!(t.contains(2));
        assert!(!t.contains(3));
        assert_eq!(t.distance(2), Some(5));
        assert_eq!(t.get(1), Some(Arrival { predecessor: 1, distance: 0 }));

        let mut all: Vec<_> = t.iter().map(|(id, a)| (id, a.distance)).collect();
        all.sort();
        assert_eq!(all, vec![(1, 0), (2, 5)]);
    }

    #[test]
    #[should_panic(expected = "cycle in search tree")]
    fn reconstruct_rejects_cycles() {
        let t = tree(1, &[(1, 1, 0), (2, 3, 5), (3, 2, 5)]);
        reconstruct_path(&t, 1, 2);
    }

    #[test]
    #[should_panic(expected = "source of the search tree")]
    fn reconstruct_from_other_source() {
        let t = tree(1, &[(1, 1, 0), (2, 1, 5), (3, 2, 8)]);
        reconstruct_path(&t, 2, 3);
    }
}
