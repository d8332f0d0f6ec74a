// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{manhattan_distance, Point, Vertex};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up nearest-vertex search for large graphs. Answering many
/// queries with [crate::Graph::find_nearest_vertex] requires a scan over the whole graph
/// for every single query; a k-d tree trades memory usage for CPU time.
///
/// Distances are measured with [manhattan_distance] over fixed-point coordinates,
/// so the results are exactly the same as those of [crate::Graph::find_nearest_vertex],
/// including ties being resolved in favor of the lowest id.
#[derive(Debug, Clone)]
pub struct KDTree {
    pivot: Vertex,
    left: Option<Box<KDTree>>,
    right: Option<Box<KDTree>>,
}

impl KDTree {
    /// Finds the closest [Vertex] to the given position.
    pub fn find_nearest_vertex(&self, position: Point) -> Vertex {
        self.find_nearest_vertex_impl(position, false).0
    }

    fn find_nearest_vertex_impl(&self, position: Point, lon_divides: bool) -> (Vertex, u64) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = manhattan_distance(position, best.position);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            position.lon < best.position.lon
        } else {
            position.lat < best.position.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        // Recurse into the first branch
        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_vertex_impl(position, !lon_divides);
            if is_better(alt, alt_dist, best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        // (Optionally) recurse into the second branch
        if let Some(ref branch) = second {
            // A closer (or equally close, but with a lower id) vertex is possible
            // in the second branch if and only if the splitting axis is not further
            // than the current best candidate.
            let dist_to_axis = if lon_divides {
                position.lon.abs_diff(self.pivot.position.lon)
            } else {
                position.lat.abs_diff(self.pivot.position.lat)
            };

            if dist_to_axis <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_vertex_impl(position, !lon_divides);
                if is_better(alt, alt_dist, best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        return (best, best_dist);
    }

    /// Builds a k-d tree from an iterable of [Vertices](Vertex).
    pub fn from_iter<I: IntoIterator<Item = Vertex>>(vertices: I) -> Option<Self> {
        let mut vertices = vertices.into_iter().collect::<Vec<_>>();
        Self::build(vertices.as_mut_slice())
    }

    /// Builds a k-d tree from a mutable slice of [Vertices](Vertex). Vertices will be reordered
    /// in the slice to facilitate building the tree.
    pub fn build(vertices: &mut [Vertex]) -> Option<Self> {
        Self::build_impl(vertices, false)
    }

    fn build_impl(vertices: &mut [Vertex], lon_divides: bool) -> Option<Self> {
        match vertices.len() {
            0 => None,
            1 => Some(Self {
                pivot: vertices[0],
                left: None,
                right: None,
            }),
            _ => {
                let median = vertices.len() / 2;
                if lon_divides {
                    vertices.select_nth_unstable_by_key(median, |v| v.position.lon);
                } else {
                    vertices.select_nth_unstable_by_key(median, |v| v.position.lat);
                }
                let pivot = vertices[median];
                let (left, right_and_pivot) = vertices.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build_impl(left, !lon_divides).map(Box::new),
                    right: Self::build_impl(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

#[inline]
fn is_better(candidate: Vertex, candidate_dist: u64, best: Vertex, best_dist: u64) -> bool {
    (candidate_dist, candidate.id) < (best_dist, best.id)
}
