// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{manhattan_distance, Edge, Point, Vertex, VertexId};
use std::collections::btree_map::{BTreeMap, Entry};

/// Represents a road network as a set of [Vertices](Vertex)
/// and directed, weighted [Edges](Edge) between them.
///
/// The graph is built once and then only read while answering queries,
/// so a shared reference can be reused across any number of searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<VertexId, (Vertex, Vec<Edge>)>);

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of edges in the graph, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(|(_, edges)| edges.len()).sum()
    }

    /// Returns an iterator over all [Vertices](Vertex) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.0.values().map(|(vertex, _)| vertex)
    }

    /// Retrieves a [Vertex] with the provided id.
    pub fn get_vertex(&self, id: VertexId) -> Option<Vertex> {
        self.0.get(&id).map(|&(vertex, _)| vertex)
    }

    /// Returns `true` if a vertex with the provided id exists.
    pub fn contains(&self, id: VertexId) -> bool {
        self.0.contains_key(&id)
    }

    /// Registers a [Vertex] with `vertex.id`.
    ///
    /// Re-adding an existing id updates its position, but preserves
    /// all outgoing edges. Weights of already-added edges are not recomputed.
    pub fn add_vertex(&mut self, vertex: Vertex) {
        match self.0.entry(vertex.id) {
            Entry::Vacant(e) => {
                e.insert((vertex, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, vertex.id);
                e.get_mut().0 = vertex;
            }
        }
    }

    /// Registers a directed [Edge] from one vertex to another.
    ///
    /// Parallel edges are not deduplicated - every call adds a new transition.
    ///
    /// Both vertices must already be registered; adding an edge between unknown
    /// vertices is a programming error and panics.
    ///
    /// The sum of weights along any route must fit in a [u64], or searches over
    /// the graph panic. Weights computed by [Graph::add_road] from positions within
    /// the valid latitude and longitude range always satisfy this.
    pub fn add_edge(&mut self, from_id: VertexId, to_id: VertexId, weight: u64) {
        assert!(self.contains(to_id), "edge to unknown vertex {}", to_id);

        match self.0.get_mut(&from_id) {
            Some((_, edges)) => edges.push(Edge { to: to_id, weight }),
            None => panic!("edge from unknown vertex {}", from_id),
        }
    }

    /// Registers a directed [Edge] weighted by the [Manhattan distance](manhattan_distance)
    /// between the positions of both vertices. Returns the weight of the new edge.
    ///
    /// Same preconditions as [Graph::add_edge] apply.
    pub fn add_road(&mut self, from_id: VertexId, to_id: VertexId) -> u64 {
        let (from, to) = match (self.get_vertex(from_id), self.get_vertex(to_id)) {
            (Some(from), Some(to)) => (from, to),
            (None, _) => panic!("road from unknown vertex {}", from_id),
            (_, None) => panic!("road to unknown vertex {}", to_id),
        };

        let weight = manhattan_distance(from.position, to.position);
        self.add_edge(from_id, to_id, weight);
        weight
    }

    /// Gets all outgoing [Edges](Edge) from a vertex with a given id, in insertion order.
    ///
    /// Unknown vertices have no outgoing edges.
    pub fn neighbors(&self, from_id: VertexId) -> &[Edge] {
        self.0
            .get(&from_id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the weight of the cheapest [Edge] from one vertex to another,
    /// or [None] if no such edge exists.
    pub fn get_edge(&self, from_id: VertexId, to_id: VertexId) -> Option<u64> {
        self.neighbors(from_id)
            .iter()
            .filter(|edge| edge.to == to_id)
            .map(|edge| edge.weight)
            .min()
    }

    /// Finds the closest [Vertex] to the given position under the Manhattan metric.
    /// Ties are resolved in favor of the lowest id.
    ///
    /// This function requires computing the distance to every [Vertex] in the graph;
    /// use a [KDTree](crate::KDTree) for repeated lookups on large graphs.
    pub fn find_nearest_vertex(&self, position: Point) -> Option<Vertex> {
        self.iter()
            .min_by_key(|v| manhattan_distance(position, v.position))
            .copied()
    }
}
