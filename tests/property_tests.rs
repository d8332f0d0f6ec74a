//! Property-based tests for the shortest-path engine using proptest.
//!
//! Every search is checked against a brute-force relaxation over small random graphs.

use proptest::prelude::*;

use roadroute::{find_route, reconstruct_path, shortest_paths, Graph, Point, Vertex, VertexId};

/// A small random graph: vertex count and a list of weighted directed edges.
fn arb_graph() -> impl Strategy<Value = (VertexId, Vec<(VertexId, VertexId, u64)>)> {
    (1..10i32).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0..50u64);
        (Just(n), prop::collection::vec(edge, 0..30))
    })
}

fn build(n: VertexId, edges: &[(VertexId, VertexId, u64)]) -> Graph {
    let mut g = Graph::new();
    for id in 0..n {
        g.add_vertex(Vertex {
            id,
            position: Point::default(),
        });
    }
    for &(from, to, weight) in edges {
        g.add_edge(from, to, weight);
    }
    g
}

/// Bellman-Ford style relaxation, repeated until nothing changes.
fn brute_force(
    n: VertexId,
    edges: &[(VertexId, VertexId, u64)],
    source: VertexId,
) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; n as usize];
    dist[source as usize] = Some(0);

    let mut changed = true;
    while changed {
        changed = false;
        for &(from, to, weight) in edges {
            if let Some(d) = dist[from as usize] {
                let candidate = d + weight;
                if dist[to as usize].map_or(true, |current| candidate < current) {
                    dist[to as usize] = Some(candidate);
                    changed = true;
                }
            }
        }
    }

    dist
}

proptest! {
    #[test]
    fn distances_are_minimal((n, edges) in arb_graph(), source in 0..10i32) {
        let source = source % n;
        let g = build(n, &edges);
        let tree = shortest_paths(&g, source);
        let expected = brute_force(n, &edges, source);

        for id in 0..n {
            prop_assert_eq!(tree.distance(id), expected[id as usize], "vertex {}", id);
        }
    }

    #[test]
    fn tree_is_consistent_with_graph((n, edges) in arb_graph(), source in 0..10i32) {
        let source = source % n;
        let g = build(n, &edges);
        let tree = shortest_paths(&g, source);

        for (id, arrival) in tree.iter() {
            if id == source {
                prop_assert_eq!(arrival.predecessor, source);
                prop_assert_eq!(arrival.distance, 0);
                continue;
            }

            let predecessor = tree
                .get(arrival.predecessor)
                .expect("predecessor must be in the tree");
            prop_assert!(predecessor.distance <= arrival.distance);
            prop_assert!(g
                .neighbors(arrival.predecessor)
                .iter()
                .any(|e| e.to == id && predecessor.distance + e.weight == arrival.distance));
        }
    }

    #[test]
    fn path_weight_equals_distance((n, edges) in arb_graph(), source in 0..10i32) {
        let source = source % n;
        let g = build(n, &edges);
        let tree = shortest_paths(&g, source);

        for id in 0..n {
            match reconstruct_path(&tree, source, id) {
                Some(path) => {
                    prop_assert_eq!(path.first(), Some(&source));
                    prop_assert_eq!(path.last(), Some(&id));

                    let weight: u64 = path
                        .windows(2)
                        .map(|pair| {
                            g.get_edge(pair[0], pair[1])
                                .expect("consecutive vertices must be connected")
                        })
                        .sum();
                    prop_assert_eq!(Some(weight), tree.distance(id));
                }
                None => prop_assert!(!tree.contains(id)),
            }
        }
    }

    #[test]
    fn repeated_searches_agree((n, edges) in arb_graph(), source in 0..10i32) {
        let source = source % n;
        let g = build(n, &edges);
        let first = shortest_paths(&g, source);
        let second = shortest_paths(&g, source);

        prop_assert_eq!(first.len(), second.len());
        for id in 0..n {
            prop_assert_eq!(first.distance(id), second.distance(id));
        }
    }

    #[test]
    fn route_to_self_is_trivial((n, edges) in arb_graph(), source in 0..10i32) {
        let source = source % n;
        let g = build(n, &edges);
        let route = find_route(&g, source, source)
            .expect("a vertex is always reachable from itself");

        prop_assert_eq!(route.vertices, vec![source]);
        prop_assert_eq!(route.distance, 0);
    }
}
