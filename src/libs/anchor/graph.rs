use crate::libs::contig::Contigs;
use crate::libs::error::HicError;
use crate::libs::tour::Orientation;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::BufRead;

/// NodeId is an index into the NodeGraph's node vector.
pub type NodeId = usize;

/// PathId is an index into the NodeGraph's path vector.
pub type PathId = usize;

/// Node -> (neighbor -> weight). Iteration follows insertion order.
pub type Graph = IndexMap<NodeId, IndexMap<NodeId, f64>>;

/// Which end of a unit a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    /// Start of the unit as stored, marker 0
    Head,
    /// End of the unit as stored, marker 1
    Tail,
}

impl End {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "0" => Some(End::Head),
            "1" => Some(End::Tail),
            _ => None,
        }
    }
}

/// A unit being scaffolded: one contig or an already assembled path.
#[derive(Debug, Clone)]
pub struct Path {
    pub id: PathId,
    pub contigs: Vec<(usize, Orientation)>,
    /// Total length in bases
    pub length: usize,
}

impl Path {
    /// Contigs as read when entering the unit at `end`.
    pub fn read_from(&self, end: End) -> impl Iterator<Item = (usize, Orientation)> + '_ {
        let forward = end == End::Head;
        let n = self.contigs.len();
        (0..n).map(move |i| {
            if forward {
                self.contigs[i]
            } else {
                let (idx, o) = self.contigs[n - 1 - i];
                (idx, o.flip())
            }
        })
    }
}

/// An oriented endpoint of a unit.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub path: PathId,
    pub end: End,
    /// The opposite end of the same unit
    pub sister: NodeId,
}

/// A step of a walk. Weight 0 marks a sister edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn sister(a: NodeId, b: NodeId) -> Self {
        Self { a, b, weight: 0.0 }
    }

    pub fn is_sister(&self) -> bool {
        self.weight == 0.0
    }

    pub fn reversed(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            weight: self.weight,
        }
    }
}

/// Arena of units and their endpoints, plus raw link counts between endpoints.
#[derive(Debug, Default, Clone)]
pub struct NodeGraph {
    paths: Vec<Path>,
    nodes: Vec<Node>,
    path_of_contig: HashMap<usize, PathId>,
    links: Graph,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// One single-contig unit per contig in `subset`, in the given order.
    pub fn from_contigs(contigs: &Contigs, subset: &[usize]) -> Self {
        let mut graph = Self::new();
        for &idx in subset {
            graph.add_path(vec![(idx, Orientation::Forward)], contigs.length(idx));
        }
        graph
    }

    /// Adds a unit and its two sister nodes (head first, then tail).
    pub fn add_path(&mut self, contigs: Vec<(usize, Orientation)>, length: usize) -> PathId {
        let id = self.paths.len();
        let head = self.nodes.len();
        let tail = head + 1;

        for &(idx, _) in &contigs {
            self.path_of_contig.insert(idx, id);
        }
        self.paths.push(Path { id, contigs, length });
        self.nodes.push(Node {
            id: head,
            path: id,
            end: End::Head,
            sister: tail,
        });
        self.nodes.push(Node {
            id: tail,
            path: id,
            end: End::Tail,
            sister: head,
        });
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, HicError> {
        self.nodes
            .get(id)
            .ok_or_else(|| HicError::Integrity(format!("node {} not found", id)))
    }

    pub fn path_of(&self, id: NodeId) -> Result<&Path, HicError> {
        let node = self.node(id)?;
        Ok(&self.paths[node.path])
    }

    /// The sister of `id`. Sisters must point at each other from the same unit.
    pub fn sister(&self, id: NodeId) -> Result<NodeId, HicError> {
        let node = self.node(id)?;
        match self.nodes.get(node.sister) {
            Some(s) if s.id != id && s.sister == id && s.path == node.path => Ok(s.id),
            _ => Err(HicError::Integrity(format!("node {} has no sister edge", id))),
        }
    }

    /// The node standing for `end` of unit `path`.
    pub fn node_of(&self, path: PathId, end: End) -> NodeId {
        match end {
            End::Head => 2 * path,
            End::Tail => 2 * path + 1,
        }
    }

    /// The unit holding contig `idx`.
    pub fn path_of_contig(&self, idx: usize) -> Option<PathId> {
        self.path_of_contig.get(&idx).copied()
    }

    /// Adds `count` links in both directions between two endpoints.
    /// Links within one unit are ignored.
    pub fn add_link(&mut self, a: NodeId, b: NodeId, count: f64) -> Result<(), HicError> {
        let (pa, pb) = (self.node(a)?.path, self.node(b)?.path);
        if pa == pb {
            return Ok(());
        }
        *self.links.entry(a).or_default().entry(b).or_insert(0.0) += count;
        *self.links.entry(b).or_default().entry(a).or_insert(0.0) += count;
        Ok(())
    }

    /// Raw link counts between endpoints.
    pub fn links(&self) -> &Graph {
        &self.links
    }

    /// Reads `name1<TAB>end1<TAB>name2<TAB>end2<TAB>count` lines.
    /// Contigs outside the graph's units are ignored.
    pub fn load_links(&mut self, reader: Box<dyn BufRead>, contigs: &Contigs) -> anyhow::Result<()> {
        for res in crate::libs::io::data_lines(reader) {
            let (line_no, line) = res?;
            let fields: Vec<&str> = line.split('\t').map(|s| s.trim()).collect();
            if fields.len() < 5 {
                return Err(HicError::Parse {
                    line: line_no,
                    message: "expected name1, end1, name2, end2 and count".to_string(),
                }
                .into());
            }

            let parse_end = |s: &str| {
                End::parse(s).ok_or_else(|| HicError::Parse {
                    line: line_no,
                    message: format!("invalid end '{}'", s),
                })
            };
            let end1 = parse_end(fields[1])?;
            let end2 = parse_end(fields[3])?;
            let count = fields[4].parse::<f64>().ok().filter(|c| *c >= 0.0).ok_or_else(|| {
                HicError::Parse {
                    line: line_no,
                    message: format!("invalid count '{}'", fields[4]),
                }
            })?;

            let (c1, c2) = match (contigs.index_of(fields[0]), contigs.index_of(fields[2])) {
                (Some(c1), Some(c2)) => (c1, c2),
                _ => {
                    tracing::warn!("Line {}: contig pair {}-{} not found", line_no, fields[0], fields[2]);
                    continue;
                }
            };
            let (p1, p2) = match (self.path_of_contig(c1), self.path_of_contig(c2)) {
                (Some(p1), Some(p2)) => (p1, p2),
                _ => continue,
            };

            let a = self.node_of(p1, end1);
            let b = self.node_of(p2, end2);
            self.add_link(a, b, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_sisters() {
        let mut graph = NodeGraph::new();
        let p0 = graph.add_path(vec![(0, Orientation::Forward)], 100);
        let p1 = graph.add_path(vec![(1, Orientation::Forward)], 200);

        assert_eq!(graph.node_count(), 4);
        for id in 0..4 {
            let s = graph.sister(id).unwrap();
            assert_eq!(graph.sister(s).unwrap(), id);
            assert_eq!(graph.node(s).unwrap().path, graph.node(id).unwrap().path);
        }
        assert_eq!(graph.node_of(p1, End::Tail), 3);
        assert_eq!(graph.node(graph.node_of(p0, End::Head)).unwrap().end, End::Head);
        assert!(matches!(graph.sister(7), Err(HicError::Integrity(_))));
    }

    #[test]
    fn test_add_link() {
        let mut graph = NodeGraph::new();
        graph.add_path(vec![(0, Orientation::Forward)], 100);
        graph.add_path(vec![(1, Orientation::Forward)], 100);

        graph.add_link(1, 2, 3.0).unwrap();
        graph.add_link(2, 1, 2.0).unwrap();
        graph.add_link(0, 1, 9.0).unwrap();

        assert_eq!(graph.links()[&1][&2], 5.0);
        assert_eq!(graph.links()[&2][&1], 5.0);
        assert!(!graph.links().contains_key(&0));
        assert!(graph.add_link(1, 8, 1.0).is_err());
    }

    #[test]
    fn test_read_from_tail() {
        let path = Path {
            id: 0,
            contigs: vec![(0, Orientation::Forward), (1, Orientation::Reverse)],
            length: 300,
        };
        let fwd: Vec<_> = path.read_from(End::Head).collect();
        assert_eq!(fwd, path.contigs);
        let rev: Vec<_> = path.read_from(End::Tail).collect();
        assert_eq!(rev, vec![(1, Orientation::Forward), (0, Orientation::Reverse)]);
    }

    #[test]
    fn test_load_links() {
        let mut contigs = Contigs::new();
        for name in ["a", "b", "c"] {
            contigs.push(name, 100, false).unwrap();
        }
        let mut graph = NodeGraph::from_contigs(&contigs, &[0, 1]);
        let text = "a\t1\tb\t0\t12\na\t0\tc\t0\t4\nb\t1\tx\t0\t1\n";
        graph
            .load_links(Box::new(BufReader::new(text.as_bytes())), &contigs)
            .unwrap();

        // c has no unit, x is unknown
        assert_eq!(graph.links().len(), 2);
        assert_eq!(graph.links()[&1][&2], 12.0);

        let bad = "a\t2\tb\t0\t12\n";
        let err = graph
            .load_links(Box::new(BufReader::new(bad.as_bytes())), &contigs)
            .unwrap_err();
        assert!(err.to_string().contains("invalid end"));
    }
}
