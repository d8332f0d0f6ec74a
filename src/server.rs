// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Answering route requests over a byte stream, one at a time.

use std::io;
use std::time::Instant;

use crate::protocol::{self, Request, Response};
use crate::{find_route, Graph, KDTree, Point, Route, Vertex};

/// Error conditions which may end a [Server] session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("road network has no vertices")]
    EmptyGraph,

    #[error("protocol: {0}")]
    Protocol(#[from] protocol::Error),
}

/// Server owns a loaded road network and answers route requests against it.
///
/// The graph is never modified after construction; every request computes
/// a fresh shortest-path tree and nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct Server {
    graph: Graph,
    index: KDTree,
}

impl Server {
    /// Creates a new server over a non-empty graph, building a nearest-vertex index.
    pub fn new(graph: Graph) -> Result<Self, Error> {
        let index = KDTree::from_iter(graph.iter().copied()).ok_or(Error::EmptyGraph)?;
        Ok(Self { graph, index })
    }

    /// Finds the vertex nearest to the provided position.
    pub fn resolve(&self, position: Point) -> Vertex {
        self.index.find_nearest_vertex(position)
    }

    /// Finds the shortest route between the vertices nearest to the provided positions.
    pub fn route(&self, start: Point, end: Point) -> Option<Route> {
        let from = self.resolve(start);
        let to = self.resolve(end);
        log::debug!("resolved {} to vertex {} and {} to vertex {}", start, from.id, end, to.id);

        let started = Instant::now();
        let route = find_route(&self.graph, from.id, to.id);
        log::debug!(
            "route {} -> {}: {} in {:?}",
            from.id,
            to.id,
            match route {
                Some(ref r) => format!("{} vertices, distance {}", r.vertices.len(), r.distance),
                None => "unreachable".to_string(),
            },
            started.elapsed(),
        );

        route
    }

    /// Answers a single route request with the positions of consecutive vertices
    /// along the route.
    pub fn answer(&self, start: Point, end: Point) -> Response {
        match self.route(start, end) {
            Some(route) => Response::Route(
                route
                    .vertices
                    .iter()
                    .filter_map(|&id| self.graph.get_vertex(id))
                    .map(|v| v.position)
                    .collect(),
            ),
            None => Response::NoRoute,
        }
    }

    /// Serves requests read from `input` until the shutdown token or end of stream,
    /// writing responses to `output`.
    ///
    /// Returns the number of answered route requests.
    pub fn serve<R: io::BufRead, W: io::Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<usize, Error> {
        let mut answered: usize = 0;

        loop {
            match protocol::read_request(&mut input)? {
                Request::Route { start, end } => {
                    let response = self.answer(start, end);
                    protocol::write_response(&mut output, &response)?;
                    answered += 1;
                }

                Request::Quit => {
                    log::info!("shutdown requested after {} route requests", answered);
                    return Ok(answered);
                }
            }
        }
    }
}
