//! Schreier trees.
use crate::perm::Perm;
use crate::schreier::SchreierStructure;
use crate::El;

#[derive(Clone, Copy, Debug)]
struct Edge {
    parent: El,
    label: usize,
    depth: usize,
}

/// A spanning tree of an orbit, rooted at the orbit's base point.
///
/// Every non-root point stores its parent and the label mapping the parent to it. The transversal
/// element of a point is the product of the labels along the path from the root, which costs one
/// composition per tree level.
#[derive(Clone, Debug, Default)]
pub struct SchreierTree {
    root: El,
    labels: Vec<Perm>,
    nodes: Vec<El>,
    // indexed by point, None for the root and points outside the orbit
    edges: Vec<Option<Edge>>,
}

impl SchreierTree {
    pub fn new() -> SchreierTree {
        SchreierTree::default()
    }

    fn edge(&self, node: El) -> Option<Edge> {
        self.edges.get(node as usize).cloned().flatten()
    }

    /// The deepest node, the root if there is no other.
    pub fn deepest_node(&self) -> El {
        self.nodes
            .iter()
            .filter_map(|&node| self.edge(node).map(|edge| (edge.depth, node)))
            .max_by_key(|&(depth, _)| depth)
            .map_or(self.root, |(_, node)| node)
    }
}

impl SchreierStructure for SchreierTree {
    fn create_root(&mut self, root: El) {
        self.root = root;
        self.nodes.clear();
        self.nodes.push(root);
        self.edges.clear();
    }

    fn create_labels(&mut self, labels: &[Perm]) {
        self.labels = labels.to_vec();
    }

    fn create_edge(&mut self, origin: El, destination: El, label: usize) {
        let depth = self.edge(destination).map_or(0, |edge| edge.depth) + 1;
        if self.edges.len() <= origin as usize {
            self.edges.resize(origin as usize + 1, None);
        }
        self.edges[origin as usize] = Some(Edge {
            parent: destination,
            label,
            depth,
        });
        self.nodes.push(origin);
    }

    fn root(&self) -> El {
        self.root
    }

    fn nodes(&self) -> Vec<El> {
        self.nodes.clone()
    }

    fn labels(&self) -> &[Perm] {
        &self.labels
    }

    fn contains(&self, node: El) -> bool {
        node == self.root || self.edge(node).is_some()
    }

    fn transversal(&self, node: El) -> Option<Perm> {
        if !self.contains(node) {
            return None;
        }

        let mut path = vec![];
        let mut current = node;
        while let Some(edge) = self.edge(current) {
            path.push(edge.label);
            current = edge.parent;
        }

        let mut result = Perm::new();
        for &label in path.iter().rev() {
            result = result.then(&self.labels[label]);
        }
        Some(result)
    }

    fn depth(&self) -> usize {
        self.edge(self.deepest_node()).map_or(0, |edge| edge.depth)
    }

    fn clone_box(&self) -> Box<dyn SchreierStructure> {
        Box::new(self.clone())
    }
}
