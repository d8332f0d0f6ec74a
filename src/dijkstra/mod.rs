// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod engine;
mod tree;

pub use engine::shortest_paths;
pub use tree::{reconstruct_path, Arrival, SearchTree};

use crate::{Graph, VertexId};

/// A route between two vertices, as returned by [find_route].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Vertices along the route, from the start to the end (both inclusive).
    pub vertices: Vec<VertexId>,

    /// Total weight of all edges along the route.
    pub distance: u64,
}

/// Finds the shortest route between two vertices of the provided graph,
/// by computing the full [SearchTree] from `from_id` with [shortest_paths]
/// and then walking it back from `to_id` with [reconstruct_path].
///
/// Returns [None] if `to_id` is not reachable from `from_id`. Routing from a vertex
/// to itself yields a single-vertex route with zero distance.
pub fn find_route(g: &Graph, from_id: VertexId, to_id: VertexId) -> Option<Route> {
    let tree = shortest_paths(g, from_id);
    let vertices = reconstruct_path(&tree, from_id, to_id)?;
    let distance = tree.distance(to_id)?;
    Some(Route { vertices, distance })
}
