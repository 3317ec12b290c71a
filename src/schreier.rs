//! Storage of orbit transversals.
//!
//! For a point `x` and a group `G` the transversal of the orbit `x^G` contains, for each orbit
//! point `y`, one element of `G` mapping `x` to `y`. A stabilizer chain keeps one transversal per
//! level. The strategies in this module trade memory for the cost of retrieving a transversal
//! element:
//!
//! * [`ExplicitTransversals`] stores a full permutation per orbit point.
//! * [`SchreierTree`] stores, per orbit point, a parent point and the generator leading from the
//!   parent to it. Elements are reconstructed by walking up to the root.
//! * [`ShallowSchreierTree`] is a Schreier tree whose depth is kept logarithmic in the orbit size
//!   by adding auxiliary labels.
//!
//! All strategies are filled through the same calls, usually made by
//! [`orbit_of`](crate::orbit::orbit_of).
use std::fmt;

use crate::perm::Perm;
use crate::El;

pub mod explicit;
pub mod shallow;
pub mod tree;

pub use self::explicit::ExplicitTransversals;
pub use self::shallow::ShallowSchreierTree;
pub use self::tree::SchreierTree;

/// Orbit and transversal of a single point.
///
/// An edge from `destination` to `origin` labeled `i` records that the `i`-th label maps
/// `destination` to `origin`. Every recorded point except the root has exactly one incoming edge
/// and its source was recorded earlier.
pub trait SchreierStructure: fmt::Debug + Send + Sync {
    /// Reset the structure to contain only `root`.
    fn create_root(&mut self, root: El);

    /// Set the labels edges refer to.
    fn create_labels(&mut self, labels: &[Perm]);

    /// Record that `labels[label]` maps `destination` to the new point `origin`.
    fn create_edge(&mut self, origin: El, destination: El, label: usize);

    /// Called once the orbit is complete.
    fn finish(&mut self) {}

    fn root(&self) -> El;

    /// The orbit points, root first, in the order they were recorded.
    fn nodes(&self) -> Vec<El>;

    /// The labels as passed to [`create_labels`](SchreierStructure::create_labels).
    fn labels(&self) -> &[Perm];

    /// Whether a point is in the orbit.
    fn contains(&self, node: El) -> bool;

    /// An element mapping the root to `node`, or None if `node` is not in the orbit.
    fn transversal(&self, node: El) -> Option<Perm>;

    /// The maximal number of labels multiplied to obtain a transversal element.
    fn depth(&self) -> usize;

    fn clone_box(&self) -> Box<dyn SchreierStructure>;
}

impl Clone for Box<dyn SchreierStructure> {
    fn clone(&self) -> Box<dyn SchreierStructure> {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::{prelude::*, *};

    use crate::action::PointAction;
    use crate::orbit::orbit_of;
    use crate::perm::tests::random_perm;

    fn strategies() -> Vec<Box<dyn SchreierStructure>> {
        vec![
            Box::new(ExplicitTransversals::new()),
            Box::new(SchreierTree::new()),
            Box::new(ShallowSchreierTree::new()),
        ]
    }

    #[test]
    fn root_only() {
        for mut ss in strategies() {
            let orbit = orbit_of(3, &[], Some(ss.as_mut()));
            assert_eq!(orbit, vec![3]);
            assert_eq!(ss.root(), 3);
            assert_eq!(ss.nodes(), vec![3]);
            assert!(ss.contains(3));
            assert!(!ss.contains(0));
            assert_eq!(ss.transversal(3), Some(Perm::new()));
            assert_eq!(ss.depth(), 0);
        }
    }

    #[test]
    fn rebuild_resets() {
        let gens = vec![Perm::from_cycles(&[[0, 1, 2]]).unwrap()];
        let other = vec![Perm::from_cycles(&[[4, 5]]).unwrap()];
        for mut ss in strategies() {
            orbit_of(0, &gens, Some(ss.as_mut()));
            orbit_of(4, &other, Some(ss.as_mut()));
            assert_eq!(ss.nodes(), vec![4, 5]);
            assert!(!ss.contains(1));
            assert_eq!(ss.labels(), &other[..]);
        }
    }

    proptest! {
        #[test]
        fn transversals_map_root(
            gens in prop::collection::vec(random_perm(0..40u32), 1..4),
            x in 0..40u32,
        ) {
            for mut ss in strategies() {
                let orbit = orbit_of(x, &gens, Some(ss.as_mut()));
                let mut nodes = ss.nodes();
                nodes.sort();
                let mut sorted_orbit = orbit.clone();
                sorted_orbit.sort();
                prop_assert_eq!(nodes, sorted_orbit);
                prop_assert_eq!(ss.root(), x);
                prop_assert_eq!(ss.labels(), &gens[..]);
                for &y in orbit.iter() {
                    prop_assert!(ss.contains(y));
                    prop_assert_eq!(ss.transversal(y).unwrap().image(x), y);
                }
            }
        }

        #[test]
        fn shallow_tree_depth_bounded(
            n in 2..200u32,
        ) {
            // A single long cycle gives a path of length n - 1 as breadth-first tree.
            let gens = vec![Perm::from_cycles(&[(0..n).collect::<Vec<_>>()]).unwrap()];
            let mut ss = ShallowSchreierTree::new();
            orbit_of(0, &gens, Some(&mut ss));
            prop_assert!(ss.depth() <= ShallowSchreierTree::depth_bound(n as usize));
            for y in 0..n {
                prop_assert_eq!(ss.transversal(y).unwrap().image(0), y);
            }
        }
    }
}
