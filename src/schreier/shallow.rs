//! Schreier trees of bounded depth.
use tracing::trace;

use crate::orbit::orbit_of;
use crate::perm::Perm;
use crate::schreier::tree::SchreierTree;
use crate::schreier::SchreierStructure;
use crate::El;

/// A Schreier tree kept shallow by auxiliary labels.
///
/// After the orbit is complete, the transversal element of the deepest node is added as a label
/// and the breadth-first tree is rebuilt, until the depth is at most
/// [`depth_bound`](ShallowSchreierTree::depth_bound). Auxiliary labels are only used for
/// reconstruction; [`labels`](SchreierStructure::labels) reports the labels as given.
#[derive(Clone, Debug, Default)]
pub struct ShallowSchreierTree {
    labels: Vec<Perm>,
    auxiliary: Vec<Perm>,
    tree: SchreierTree,
}

impl ShallowSchreierTree {
    pub fn new() -> ShallowSchreierTree {
        ShallowSchreierTree::default()
    }

    /// Maximal depth for an orbit of the given size: `2 * ceil(log2(size))`, at least 1.
    pub fn depth_bound(orbit_size: usize) -> usize {
        let mut log = 0;
        while (1usize << log) < orbit_size {
            log += 1;
        }
        (2 * log).max(1)
    }
}

impl SchreierStructure for ShallowSchreierTree {
    fn create_root(&mut self, root: El) {
        self.auxiliary.clear();
        self.tree.create_root(root);
    }

    fn create_labels(&mut self, labels: &[Perm]) {
        self.labels = labels.to_vec();
        self.tree.create_labels(labels);
    }

    fn create_edge(&mut self, origin: El, destination: El, label: usize) {
        self.tree.create_edge(origin, destination, label);
    }

    fn finish(&mut self) {
        let bound = Self::depth_bound(self.tree.nodes().len());
        while self.tree.depth() > bound {
            let deepest = self.tree.deepest_node();
            let shortcut = self
                .tree
                .transversal(deepest)
                .expect("deepest node is in the orbit");
            trace!(
                depth = self.tree.depth(),
                bound,
                node = deepest,
                "adding shortcut label to Schreier tree"
            );
            self.auxiliary.push(shortcut);

            let mut labels = self.labels.clone();
            labels.extend(self.auxiliary.iter().cloned());
            let root = self.tree.root();
            orbit_of(root, &labels, Some(&mut self.tree));
        }
    }

    fn root(&self) -> El {
        self.tree.root()
    }

    fn nodes(&self) -> Vec<El> {
        self.tree.nodes()
    }

    fn labels(&self) -> &[Perm] {
        &self.labels
    }

    fn contains(&self, node: El) -> bool {
        self.tree.contains(node)
    }

    fn transversal(&self, node: El) -> Option<Perm> {
        self.tree.transversal(node)
    }

    fn depth(&self) -> usize {
        self.tree.depth()
    }

    fn clone_box(&self) -> Box<dyn SchreierStructure> {
        Box::new(self.clone())
    }
}
