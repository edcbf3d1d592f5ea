//! Heuristic planarity check.
//!
//! Looks for the two Kuratowski graphs as plain subgraphs: K5 anywhere, and
//! K3,3 across the two classes of a 2-coloring. Subdivisions and minors of
//! K5 / K3,3 are not detected, so a `true` answer only means "no obvious
//! obstruction found". Worst case is O(V^5), fine for graphs of a few
//! hundred nodes.

use super::node::NodeId;

/// Symmetric boolean adjacency matrix.
pub(crate) struct DenseAdjacency {
    size: usize,
    cells: Vec<bool>,
}

impl DenseAdjacency {
    pub(crate) fn from_neighbors(neighbors: &[Vec<NodeId>]) -> Self {
        let size = neighbors.len();
        let mut cells = vec![false; size * size];
        for (u, list) in neighbors.iter().enumerate() {
            for v in list {
                cells[u * size + v.0] = true;
                cells[v.0 * size + u] = true;
            }
        }
        Self { size, cells }
    }

    fn connected(&self, u: usize, v: usize) -> bool {
        self.cells[u * self.size + v]
    }
}

/// Checks the planarity heuristic.
///
/// `bipartition` holds the two color classes when the graph is 2-colorable.
pub(crate) fn is_planar(
    neighbors: &[Vec<NodeId>],
    bipartition: Option<(&[NodeId], &[NodeId])>,
) -> bool {
    let v = neighbors.len();
    if v <= 2 {
        return true;
    }

    let e = neighbors.iter().map(Vec::len).sum::<usize>() / 2;
    if e > 3 * v - 6 {
        return false;
    }

    let adjacency = DenseAdjacency::from_neighbors(neighbors);
    if contains_clique(&adjacency, 5) {
        return false;
    }

    if let Some((left, right)) = bipartition {
        if contains_k33(&adjacency, left, right) {
            return false;
        }
    }

    true
}

/// Checks for a complete subgraph on `k` vertices.
pub(crate) fn contains_clique(adjacency: &DenseAdjacency, k: usize) -> bool {
    fn extend(adjacency: &DenseAdjacency, chosen: &mut Vec<usize>, from: usize, k: usize) -> bool {
        if chosen.len() == k {
            return true;
        }
        for candidate in from..adjacency.size {
            if chosen.iter().all(|&c| adjacency.connected(c, candidate)) {
                chosen.push(candidate);
                if extend(adjacency, chosen, candidate + 1, k) {
                    return true;
                }
                chosen.pop();
            }
        }
        false
    }

    let mut chosen = Vec::with_capacity(k);
    extend(adjacency, &mut chosen, 0, k)
}

/// Checks for K3,3 with one side in `left` and the other in `right`.
pub(crate) fn contains_k33(adjacency: &DenseAdjacency, left: &[NodeId], right: &[NodeId]) -> bool {
    if left.len() < 3 || right.len() < 3 {
        return false;
    }

    for a in 0..left.len() {
        for b in (a + 1)..left.len() {
            for c in (b + 1)..left.len() {
                let (x, y, z) = (left[a].0, left[b].0, left[c].0);
                let shared = right
                    .iter()
                    .filter(|r| {
                        adjacency.connected(x, r.0)
                            && adjacency.connected(y, r.0)
                            && adjacency.connected(z, r.0)
                    })
                    .count();
                if shared >= 3 {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<NodeId>> {
        let mut out = vec![Vec::new(); n];
        for &(u, v) in edges {
            out[u].push(NodeId(v));
            out[v].push(NodeId(u));
        }
        out
    }

    fn complete(n: usize) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        edges
    }

    #[test]
    fn test_tiny_graphs_are_planar() {
        assert!(is_planar(&lists(0, &[]), None));
        assert!(is_planar(&lists(2, &[(0, 1)]), None));
    }

    #[test]
    fn test_k4_is_planar() {
        assert!(is_planar(&lists(4, &complete(4)), None));
    }

    #[test]
    fn test_k5_fails_edge_bound() {
        assert!(!is_planar(&lists(5, &complete(5)), None));
    }

    #[test]
    fn test_k5_with_pendants_detected_by_subgraph_search() {
        let mut edges = complete(5);
        edges.extend([(4, 5), (5, 6), (6, 7)]);
        let neighbors = lists(8, &edges);

        assert!(contains_clique(&DenseAdjacency::from_neighbors(&neighbors), 5));
        assert!(!is_planar(&neighbors, None));
    }

    #[test]
    fn test_k33_detected_across_classes() {
        let mut edges = Vec::new();
        for u in 0..3 {
            for v in 3..6 {
                edges.push((u, v));
            }
        }
        let neighbors = lists(6, &edges);
        let left = [NodeId(0), NodeId(1), NodeId(2)];
        let right = [NodeId(3), NodeId(4), NodeId(5)];

        assert!(!is_planar(&neighbors, Some((&left[..], &right[..]))));
        // Without a bipartition the K3,3 search does not run
        assert!(is_planar(&neighbors, None));
    }
}
