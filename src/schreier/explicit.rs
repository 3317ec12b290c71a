//! Explicitly stored transversals.
use crate::perm::Perm;
use crate::schreier::SchreierStructure;
use crate::El;

/// One full permutation per orbit point.
///
/// Lookup is a clone, at the cost of storing `|orbit|` permutations.
#[derive(Clone, Debug, Default)]
pub struct ExplicitTransversals {
    root: El,
    labels: Vec<Perm>,
    nodes: Vec<El>,
    // indexed by point
    transversals: Vec<Option<Perm>>,
}

impl ExplicitTransversals {
    pub fn new() -> ExplicitTransversals {
        ExplicitTransversals::default()
    }

    fn get(&self, node: El) -> Option<&Perm> {
        self.transversals
            .get(node as usize)
            .and_then(|transversal| transversal.as_ref())
    }

    fn set(&mut self, node: El, transversal: Perm) {
        if self.transversals.len() <= node as usize {
            self.transversals.resize(node as usize + 1, None);
        }
        self.transversals[node as usize] = Some(transversal);
    }
}

impl SchreierStructure for ExplicitTransversals {
    fn create_root(&mut self, root: El) {
        self.root = root;
        self.nodes.clear();
        self.nodes.push(root);
        self.transversals.clear();
        self.set(root, Perm::new());
    }

    fn create_labels(&mut self, labels: &[Perm]) {
        self.labels = labels.to_vec();
    }

    fn create_edge(&mut self, origin: El, destination: El, label: usize) {
        let transversal = self
            .get(destination)
            .expect("edge source is recorded before its targets")
            .then(&self.labels[label]);
        self.set(origin, transversal);
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
        self.get(node).is_some()
    }

    fn transversal(&self, node: El) -> Option<Perm> {
        self.get(node).cloned()
    }

    fn depth(&self) -> usize {
        if self.nodes.len() > 1 {
            1
        } else {
            0
        }
    }

    fn clone_box(&self) -> Box<dyn SchreierStructure> {
        Box::new(self.clone())
    }
}
