use super::graph::{Edge, Graph, NodeGraph, NodeId};
use crate::libs::error::HicError;
use crate::libs::tour::Tour;

/// How a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkEnd {
    /// No confidence edge leaves the last node
    DeadEnd,
    /// Came back to a node of the current walk
    Cycle,
    /// Ran into a node owned by an earlier path
    Consumed,
}

/// Makes linear paths by following the unique extensions of the confidence graph.
///
/// Every node is the start of at most one path, in arena order. Cycles are
/// broken at their weakest confidence edge.
pub fn assemble(nodes: &NodeGraph, g: &Graph) -> Result<Vec<Tour>, HicError> {
    // Owner walk of each node, by start node
    let mut visited: Vec<Option<NodeId>> = vec![None; nodes.node_count()];
    let mut tours = vec![];
    let mut n_cycles = 0;

    for a in 0..nodes.node_count() {
        if visited[a].is_some() {
            continue;
        }

        let (mut forward, end) = walk(nodes, g, a, &mut visited, a, true)?;
        if end == WalkEnd::Cycle {
            n_cycles += 1;
            tours.push(to_tour(nodes, &break_cycle(&forward))?);
            continue;
        }
        trim_dangling(&mut forward, end);

        visited[a] = None;
        let (mut backward, end) = walk(nodes, g, a, &mut visited, a, false)?;
        trim_dangling(&mut backward, end);

        let mut path = reverse_path(&backward);
        path.extend(forward);
        tours.push(to_tour(nodes, &path)?);
    }

    tracing::info!("Assembled {} paths, {} from broken cycles", tours.len(), n_cycles);
    Ok(tours)
}

/// Alternates sister edges and confidence edges from `start`.
fn walk(
    nodes: &NodeGraph,
    g: &Graph,
    start: NodeId,
    visited: &mut [Option<NodeId>],
    owner: NodeId,
    visit_sister: bool,
) -> Result<(Vec<Edge>, WalkEnd), HicError> {
    let mut path = vec![];
    let mut a = start;
    let mut visit_sister = visit_sister;

    loop {
        match visited.get(a) {
            None => return Err(HicError::Integrity(format!("node {} not found", a))),
            Some(Some(o)) if *o == owner => return Ok((path, WalkEnd::Cycle)),
            Some(Some(_)) => return Ok((path, WalkEnd::Consumed)),
            Some(None) => {}
        }
        visited[a] = Some(owner);

        if visit_sister {
            let s = nodes.sister(a)?;
            path.push(Edge::sister(a, s));
            a = s;
            visit_sister = false;
        } else if let Some((&b, &weight)) = g.get(&a).and_then(|nb| nb.first()) {
            path.push(Edge { a, b, weight });
            a = b;
            visit_sister = true;
        } else {
            return Ok((path, WalkEnd::DeadEnd));
        }
    }
}

/// A walk that stopped on a node it does not own ends with an unusable data edge.
fn trim_dangling(path: &mut Vec<Edge>, end: WalkEnd) {
    if end != WalkEnd::DeadEnd && path.last().is_some_and(|e| !e.is_sister()) {
        path.pop();
    }
}

/// Reverses an edge path into the opposite direction.
pub fn reverse_path(path: &[Edge]) -> Vec<Edge> {
    path.iter().rev().map(|e| e.reversed()).collect()
}

/// Breaks a cycle at its weakest confidence edge.
///
/// The edges after the weakest one come first, followed by those before it,
/// so a cycle of L edges becomes a linear path of L - 1 edges.
pub fn break_cycle(path: &[Edge]) -> Vec<Edge> {
    let mut weakest: Option<(usize, f64)> = None;
    for (i, edge) in path.iter().enumerate() {
        if edge.weight > 1.0 && weakest.map_or(true, |(_, w)| edge.weight < w) {
            weakest = Some((i, edge.weight));
        }
    }

    match weakest {
        Some((i, _)) => path[i + 1..].iter().chain(&path[..i]).copied().collect(),
        None => path.to_vec(),
    }
}

/// Reads the units along the sister edges of a linear path.
fn to_tour(nodes: &NodeGraph, path: &[Edge]) -> Result<Tour, HicError> {
    let mut tour = Tour::new();
    for edge in path.iter().filter(|e| e.is_sister()) {
        let node = nodes.node(edge.a)?;
        let unit = nodes.path_of(edge.a)?;
        tour.entries.extend(unit.read_from(node.end));
    }
    Ok(tour)
}
