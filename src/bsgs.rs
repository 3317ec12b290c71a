//! Bases and strong generating sets.
//!
//! A base `b_0, ..., b_{k-1}` of a permutation group `G` defines the stabilizer chain
//! `G = G_0 > G_1 > ... > G_k = 1`, where `G_i` is the pointwise stabilizer of `b_0, ..., b_{i-1}`.
//! A strong generating set contains generators for every `G_i`: the members fixing
//! `b_0, ..., b_{i-1}` generate `G_i`. For every level the chain stores the orbit of `b_i` under
//! `G_i` together with a transversal, from which group order, membership and elements follow.
use std::fmt;

use num_bigint::BigUint;
use rand::Rng;
use tracing::debug;

use crate::action::{PointAction, RightAction};
use crate::error::{Error, Result};
use crate::orbit::orbit_of;
use crate::perm::Perm;
use crate::perm_set::PermSet;
use crate::schreier::{ExplicitTransversals, SchreierStructure, SchreierTree, ShallowSchreierTree};
use crate::El;

mod reduce;
mod schreier_sims;
mod solve;

/// Algorithm used to build a stabilizer chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construction {
    /// Deterministic Schreier-Sims, stripping every Schreier generator.
    SchreierSims,
    /// Randomized Schreier-Sims.
    ///
    /// This is a Monte Carlo algorithm: random group elements are stripped until
    /// [`random_confidence`](BsgsOptions::random_confidence) consecutive ones strip completely.
    /// With small probability the resulting chain describes a proper subgroup.
    SchreierSimsRandom,
    /// Adjoining normalizing generators. Only succeeds for solvable groups.
    Solve,
    /// Currently the same as [`SchreierSims`](Construction::SchreierSims).
    Auto,
}

/// Storage strategy for the transversal of every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transversals {
    Explicit,
    SchreierTrees,
    ShallowSchreierTrees,
    /// Currently the same as [`SchreierTrees`](Transversals::SchreierTrees).
    ///
    /// Breadth-first Schreier trees of large orbits can be deep, for example for symmetric
    /// groups of high degree generated by a transposition and a long cycle. Every transversal
    /// lookup then multiplies many labels, so such groups should use
    /// [`ShallowSchreierTrees`](Transversals::ShallowSchreierTrees).
    Auto,
}

/// Configuration of stabilizer chain construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BsgsOptions {
    pub construction: Construction,
    pub transversals: Transversals,
    /// Number of consecutive random elements that must strip completely before randomized
    /// Schreier-Sims accepts a chain. Larger values lower the probability of an incomplete chain.
    pub random_confidence: usize,
    /// Seed for randomized construction. Equal seeds give equal chains.
    pub seed: u64,
    /// Number of Schreier generators computed ahead of their use.
    pub schreier_generator_lookahead: usize,
    /// Remove redundant strong generators after construction.
    pub reduce_generators: bool,
}

impl Default for BsgsOptions {
    fn default() -> BsgsOptions {
        BsgsOptions {
            construction: Construction::Auto,
            transversals: Transversals::Auto,
            random_confidence: 10,
            seed: 0,
            schreier_generator_lookahead: 16,
            reduce_generators: true,
        }
    }
}

impl BsgsOptions {
    pub fn with_construction(mut self, construction: Construction) -> BsgsOptions {
        self.construction = construction;
        self
    }

    pub fn with_transversals(mut self, transversals: Transversals) -> BsgsOptions {
        self.transversals = transversals;
        self
    }

    pub fn with_random_confidence(mut self, random_confidence: usize) -> BsgsOptions {
        self.random_confidence = random_confidence;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> BsgsOptions {
        self.seed = seed;
        self
    }

    pub fn with_schreier_generator_lookahead(mut self, lookahead: usize) -> BsgsOptions {
        self.schreier_generator_lookahead = lookahead;
        self
    }

    pub fn with_reduce_generators(mut self, reduce_generators: bool) -> BsgsOptions {
        self.reduce_generators = reduce_generators;
        self
    }
}

/// Result of stripping a permutation through a stabilizer chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strip {
    /// What remains of the permutation after dividing off transversal elements.
    pub residual: Perm,
    /// The level at which stripping stopped, the base length if it ran through all levels.
    pub level: usize,
}

/// A base and strong generating set of a permutation group.
#[derive(Clone, Debug)]
pub struct Bsgs {
    degree: usize,
    transversals: Transversals,
    base: Vec<El>,
    schreier_structures: Vec<Box<dyn SchreierStructure>>,
    strong_generators: PermSet,
}

impl Bsgs {
    /// Build a stabilizer chain for the group generated by `generators` acting on
    /// {0, ..., degree - 1}.
    ///
    /// Fails with [`Error::PointOutOfRange`] if a generator moves a point past the degree and with
    /// [`Error::Solve`] if [`Construction::Solve`] was requested for a group it cannot handle.
    pub fn new(degree: usize, generators: PermSet, options: &BsgsOptions) -> Result<Bsgs> {
        if let Some(gen) = generators.iter().find(|gen| gen.degree() > degree) {
            return Err(Error::PointOutOfRange {
                point: (gen.degree() - 1) as El,
                degree,
            });
        }

        debug!(
            degree,
            generators = %generators,
            construction = ?options.construction,
            transversals = ?options.transversals,
            "constructing BSGS"
        );

        let mut bsgs = Bsgs::empty(degree, options.transversals);

        match options.construction {
            Construction::SchreierSims | Construction::Auto => {
                bsgs.schreier_sims(generators, options.schreier_generator_lookahead)
            }
            Construction::SchreierSimsRandom => {
                bsgs.schreier_sims_random(generators, options.random_confidence, options.seed)
            }
            Construction::Solve => bsgs.solve(&generators)?,
        }

        if options.reduce_generators {
            bsgs.remove_generators();
        }

        debug!(bsgs = %bsgs, "constructed BSGS");

        Ok(bsgs)
    }

    fn empty(degree: usize, transversals: Transversals) -> Bsgs {
        Bsgs {
            degree,
            transversals,
            base: vec![],
            schreier_structures: vec![],
            strong_generators: PermSet::new(),
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn base(&self) -> &[El] {
        &self.base
    }

    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    pub fn base_point(&self, i: usize) -> El {
        self.base[i]
    }

    /// Whether the group is trivial.
    pub fn is_trivial(&self) -> bool {
        self.base.is_empty()
    }

    pub fn strong_generators(&self) -> &PermSet {
        &self.strong_generators
    }

    /// The orbit of the `i`-th base point under the `i`-th stabilizer.
    pub fn orbit(&self, i: usize) -> Vec<El> {
        self.schreier_structures[i].nodes()
    }

    /// An element of the `i`-th stabilizer mapping the `i`-th base point to `o`.
    ///
    /// Returns None if `o` is not in the `i`-th orbit.
    pub fn transversal(&self, i: usize, o: El) -> Option<Perm> {
        self.schreier_structures[i].transversal(o)
    }

    /// The transversal elements of the `i`-th level, in the order of [`orbit`](Bsgs::orbit).
    pub fn transversals(&self, i: usize) -> Vec<Perm> {
        let ss = &self.schreier_structures[i];
        ss.nodes()
            .into_iter()
            .map(|o| {
                ss.transversal(o)
                    .expect("Schreier structure covers its own nodes")
            })
            .collect()
    }

    /// The strong generators fixing the first `i` base points.
    ///
    /// These generate the `i`-th stabilizer of the chain.
    pub fn stabilizers(&self, i: usize) -> PermSet {
        let prefix = &self.base[..i];
        self.strong_generators
            .iter()
            .filter(|gen| gen.fixes_all(prefix))
            .cloned()
            .collect()
    }

    /// Strip a permutation through the chain, starting at level `offset`.
    ///
    /// At every level the image of the base point is looked up in the level's orbit. If it is
    /// missing, stripping stops at that level. Otherwise the inverse of the transversal element
    /// is multiplied onto the permutation, which then fixes the base point, and stripping
    /// continues at the next level.
    pub fn strip(&self, perm: &Perm, offset: usize) -> Strip {
        let mut residual = perm.clone();
        let mut inverse = Perm::new();

        for i in offset..self.base.len() {
            let beta = residual.image(self.base[i]);
            match self.schreier_structures[i].transversal(beta) {
                Some(u) => {
                    u.inverse_into(&mut inverse);
                    inverse.right_apply_to(&mut residual);
                }
                None => return Strip { residual, level: i },
            }
        }

        Strip {
            residual,
            level: self.base.len(),
        }
    }

    /// Whether a permutation is an element of the group.
    pub fn strips_completely(&self, perm: &Perm) -> bool {
        let strip = self.strip(perm, 0);
        strip.level == self.base.len() && strip.residual.is_identity()
    }

    /// Same as [`strips_completely`](Bsgs::strips_completely).
    pub fn contains(&self, perm: &Perm) -> bool {
        self.strips_completely(perm)
    }

    /// The group order, the product of all orbit sizes.
    pub fn order(&self) -> BigUint {
        self.schreier_structures
            .iter()
            .map(|ss| BigUint::from(ss.nodes().len()))
            .product()
    }

    /// Iterate over all group elements.
    ///
    /// Every element is produced exactly once, as a product of one transversal element per level.
    pub fn elements(&self) -> Elements {
        Elements::new(self)
    }

    /// A uniformly distributed random group element.
    pub fn random_element<R>(&self, rng: &mut R) -> Perm
    where
        R: Rng + ?Sized,
    {
        let mut result = Perm::new();
        for ss in self.schreier_structures.iter().rev() {
            let nodes = ss.nodes();
            let o = nodes[rng.gen_range(0..nodes.len())];
            let u = ss
                .transversal(o)
                .expect("Schreier structure covers its own nodes");
            result = result.then(&u);
        }
        result
    }

    fn make_schreier_structure(&self) -> Box<dyn SchreierStructure> {
        match self.transversals {
            Transversals::Explicit => Box::new(ExplicitTransversals::new()),
            Transversals::SchreierTrees | Transversals::Auto => Box::new(SchreierTree::new()),
            Transversals::ShallowSchreierTrees => Box::new(ShallowSchreierTree::new()),
        }
    }

    /// Append a base point, with a fresh level whose orbit contains just that point.
    fn extend_base(&mut self, bp: El) {
        debug_assert!(!self.base.contains(&bp), "base points are distinct");
        let mut ss = self.make_schreier_structure();
        orbit_of(bp, &[], Some(ss.as_mut()));
        self.base.push(bp);
        self.schreier_structures.push(ss);
    }

    /// Recompute the orbit and transversal of level `i` from the given generators.
    fn update_schreier_structure(&mut self, i: usize, generators: &[Perm]) {
        let bp = self.base[i];
        orbit_of(bp, generators, Some(self.schreier_structures[i].as_mut()));
    }

    /// Recompute every level from the stabilizers in the strong generating set.
    fn redetermine_schreier_structures(&mut self) {
        for i in 0..self.base.len() {
            let stabilizers = self.stabilizers(i);
            self.update_schreier_structure(i, stabilizers.as_slice());
        }
    }
}

/// Lists base, orbit sizes and strong generators.
impl fmt::Display for Bsgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BASE: {:?}; ORBITS: [", self.base)?;
        for (i, ss) in self.schreier_structures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ss.nodes().len())?;
        }
        write!(f, "]; SGS: {}", self.strong_generators)
    }
}

/// Iterator over the elements of a group, see [`Bsgs::elements`].
pub struct Elements {
    transversals: Vec<Vec<Perm>>,
    indices: Vec<usize>,
    done: bool,
}

impl Elements {
    fn new(bsgs: &Bsgs) -> Elements {
        let transversals = (0..bsgs.base_len())
            .map(|i| bsgs.transversals(i))
            .collect::<Vec<_>>();
        let indices = vec![0; transversals.len()];
        Elements {
            transversals,
            indices,
            done: false,
        }
    }
}

impl Iterator for Elements {
    type Item = Perm;

    fn next(&mut self) -> Option<Perm> {
        if self.done {
            return None;
        }

        // deepest level first, so that stripping recovers the indices
        let mut element = Perm::new();
        for (transversal, &index) in self.transversals.iter().zip(self.indices.iter()).rev() {
            element = element.then(&transversal[index]);
        }

        self.done = true;
        for (transversal, index) in self.transversals.iter().zip(self.indices.iter_mut()) {
            *index += 1;
            if *index < transversal.len() {
                self.done = false;
                break;
            }
            *index = 0;
        }

        Some(element)
    }
}

#[cfg(test)]
mod tests;
