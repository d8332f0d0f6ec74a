// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest routes over a static road network.
//!
//! The road network is loaded from a simple line-oriented text format into a
//! weighted directed [Graph], where every edge weight is the Manhattan distance
//! between its endpoints in fixed-point units (degrees × 10<sup>5</sup>).
//! Routes are found by building a full shortest-path [SearchTree] from the start
//! vertex with Dijkstra's algorithm, and then walking that tree back from the
//! end vertex.
//!
//! # Example
//!
//! ```no_run
//! let mut g = roadroute::Graph::default();
//! let options = roadroute::loader::Options {
//!     file_format: roadroute::loader::FileFormat::Unknown,
//! };
//! roadroute::loader::add_features_from_file(&mut g, &options, "path/to/edmonton-roads.txt")
//!     .expect("failed to load the road network");
//!
//! let start = g.find_nearest_vertex(roadroute::Point::from_degrees(53.5303, -113.5304)).unwrap();
//! let end = g.find_nearest_vertex(roadroute::Point::from_degrees(53.5453, -113.4986)).unwrap();
//!
//! match roadroute::find_route(&g, start.id, end.id) {
//!     Some(route) => println!("Route: {:?} ({} units)", route.vertices, route.distance),
//!     None => println!("No route"),
//! }
//! ```

mod dijkstra;
mod distance;
#[cfg(unix)]
pub mod fifo;
mod graph;
mod kd;
pub mod loader;
pub mod protocol;
pub mod server;

pub use dijkstra::{find_route, reconstruct_path, shortest_paths, Arrival, Route, SearchTree};
pub use distance::{
    is_valid_degrees, manhattan_distance, Point, FIXED_POINT_SCALE, MAX_LATITUDE, MAX_LONGITUDE,
};
pub use graph::Graph;
pub use kd::KDTree;

/// Identifier of a [Vertex] in the [Graph].
///
/// Identifiers are limited to the 32-bit signed range; the [loader] rejects
/// anything wider.
pub type VertexId = i32;

/// Represents an element of the [Graph]: a road intersection or a point along a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point,
}

/// Represents an outgoing (one-way) connection from a specific [Vertex].
///
/// Weights are unsigned - negative weights would break the minimality
/// of routes returned by [shortest_paths].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub to: VertexId,
    pub weight: u64,
}
