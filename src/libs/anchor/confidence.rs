use super::graph::{Graph, NodeGraph, NodeId};
use crate::libs::error::HicError;
use std::collections::HashMap;

/// Recalibrates raw link counts into confidences and keeps edges above 1.
///
/// Steps are:
/// 1. density = links / (length of unit a × length of unit b)
/// 2. confidence = density / second largest density competing at either endpoint
///
/// An edge with no competitor at all is kept with infinite confidence.
pub fn make_confidence_graph(nodes: &NodeGraph, g: &Graph) -> Result<Graph, HicError> {
    let mut density: Graph = Graph::with_capacity(g.len());
    let mut two_largest: HashMap<NodeId, [f64; 2]> = HashMap::new();

    for (&a, nb) in g {
        let len_a = nodes.path_of(a)?.length.max(1) as f64;
        let (mut first, mut second) = (0.0, 0.0);
        let row = density.entry(a).or_default();
        for (&b, &links) in nb {
            let len_b = nodes.path_of(b)?.length.max(1) as f64;
            let score = links / (len_a * len_b);
            if score > first {
                second = first;
                first = score;
            } else if score > second {
                second = score;
            }
            row.insert(b, score);
        }
        two_largest.insert(a, [first, second]);
    }

    let mut confidence_graph = Graph::new();
    let mut n_edges = 0;
    for (&a, nb) in &density {
        let ta = two_largest[&a];
        for (&b, &score) in nb {
            n_edges += 1;
            let tb = two_largest.get(&b).copied().unwrap_or([0.0, 0.0]);

            let reference = second_largest(ta, tb);
            // The shared edge is the only one either endpoint has
            let exclusive = ta == [score, 0.0] && tb == [score, 0.0];
            let confidence = if reference <= 0.0 || exclusive {
                f64::INFINITY
            } else {
                score / reference
            };

            if confidence > 1.0 {
                confidence_graph.entry(a).or_default().insert(b, confidence);
            }
        }
    }

    tracing::info!(
        "Confidence graph retains {} of {} edges",
        confidence_graph.values().map(|nb| nb.len()).sum::<usize>(),
        n_edges
    );
    Ok(confidence_graph)
}

/// Second largest of two (largest, second largest) pairs.
///
/// One edge is usually counted at both of its endpoints, so a tie at the top
/// is treated as a duplicate and the next value is taken instead.
///
/// ```
/// use hicr::libs::anchor::second_largest;
/// assert_eq!(second_largest([10.0, 2.0], [8.0, 2.0]), 8.0);
/// assert_eq!(second_largest([10.0, 2.0], [10.0, 0.0]), 2.0);
/// ```
pub fn second_largest(a: [f64; 2], b: [f64; 2]) -> f64 {
    let mut values = [a[0], a[1], b[0], b[1]];
    values.sort_by(|x, y| x.total_cmp(y));
    let (largest, second) = (values[3], values[2]);
    if largest == second && values[1] > 0.0 {
        return values[1];
    }
    second
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::anchor::graph::End;
    use crate::libs::tour::Orientation;
    use approx::assert_relative_eq;

    fn unit_graph(n: usize, length: usize) -> NodeGraph {
        let mut graph = NodeGraph::new();
        for i in 0..n {
            graph.add_path(vec![(i, Orientation::Forward)], length);
        }
        graph
    }

    #[test]
    fn test_second_largest_symmetric() {
        let pairs = [
            ([10.0, 2.0], [8.0, 2.0]),
            ([10.0, 2.0], [10.0, 0.0]),
            ([5.0, 5.0], [3.0, 1.0]),
            ([4.0, 0.0], [0.0, 0.0]),
        ];
        for (a, b) in pairs {
            assert_eq!(second_largest(a, b), second_largest(b, a));
        }
    }

    #[test]
    fn test_second_largest_drops_duplicate() {
        assert_eq!(second_largest([10.0, 2.0], [10.0, 0.0]), 2.0);
        assert_eq!(second_largest([8.0, 0.0], [8.0, 2.0]), 2.0);
        // Nothing below the duplicate
        assert_eq!(second_largest([7.0, 0.0], [7.0, 0.0]), 7.0);
        assert_eq!(second_largest([4.0, 0.0], [0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_confidence_graph() {
        // A.tail-B.head 10, B.tail-C.head 8, A.tail-C.head 2
        let mut graph = unit_graph(3, 1);
        let (a_t, b_h) = (graph.node_of(0, End::Tail), graph.node_of(1, End::Head));
        let (b_t, c_h) = (graph.node_of(1, End::Tail), graph.node_of(2, End::Head));
        graph.add_link(a_t, b_h, 10.0).unwrap();
        graph.add_link(b_t, c_h, 8.0).unwrap();
        graph.add_link(a_t, c_h, 2.0).unwrap();

        let conf = make_confidence_graph(&graph, graph.links()).unwrap();
        assert_relative_eq!(conf[&a_t][&b_h], 5.0);
        assert_relative_eq!(conf[&b_h][&a_t], 5.0);
        assert_relative_eq!(conf[&b_t][&c_h], 4.0);
        assert_relative_eq!(conf[&c_h][&b_t], 4.0);
        assert!(!conf[&a_t].contains_key(&c_h));
        assert!(!conf[&c_h].contains_key(&a_t));

        for nb in conf.values() {
            for &w in nb.values() {
                assert!(w > 1.0);
            }
        }
    }

    #[test]
    fn test_density_uses_unit_lengths() {
        // Same raw counts, but the competitor sits on a much shorter unit
        let mut graph = NodeGraph::new();
        graph.add_path(vec![(0, Orientation::Forward)], 10);
        graph.add_path(vec![(1, Orientation::Forward)], 10);
        graph.add_path(vec![(2, Orientation::Forward)], 1000);
        graph.add_link(1, 2, 6.0).unwrap();
        graph.add_link(1, 4, 6.0).unwrap();

        let conf = make_confidence_graph(&graph, graph.links()).unwrap();
        assert!(conf[&1].contains_key(&2));
        assert!(!conf[&1].contains_key(&4));
    }

    #[test]
    fn test_exclusive_pair_retained() {
        let mut graph = unit_graph(2, 100);
        graph.add_link(1, 2, 5.0).unwrap();

        let conf = make_confidence_graph(&graph, graph.links()).unwrap();
        assert_eq!(conf[&1][&2], f64::INFINITY);
        assert_eq!(conf[&2][&1], f64::INFINITY);
    }

    #[test]
    fn test_tied_competitors_pruned() {
        let mut graph = unit_graph(3, 1);
        graph.add_link(1, 2, 4.0).unwrap();
        graph.add_link(1, 4, 4.0).unwrap();

        let conf = make_confidence_graph(&graph, graph.links()).unwrap();
        assert!(conf.is_empty());
    }

    #[test]
    fn test_unknown_node() {
        let graph = unit_graph(1, 1);
        let mut g = Graph::new();
        g.entry(0).or_default().insert(9, 1.0);
        assert!(make_confidence_graph(&graph, &g).is_err());
    }
}
