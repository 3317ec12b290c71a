//! Stabilizer chains of solvable groups.
//!
//! Instead of verifying Schreier generators, the group is built up along a subnormal series with
//! abelian factors. Each element added normalizes the group generated so far, which allows
//! extending the chain level by level with powers of the new element only. This requires the
//! group to be solvable; for other groups the construction gives up after a bounded number of
//! attempts.
use tracing::{debug, trace};

use crate::action::PointAction;
use crate::bsgs::Bsgs;
use crate::error::{Error, Result};
use crate::perm::Perm;
use crate::perm_set::PermSet;

impl Bsgs {
    /// Build the chain by repeatedly adjoining normal closures.
    ///
    /// For every generator not yet in the group, the normal closure of a candidate `w` (starting
    /// with the generator itself) is added. If that fails because two conjugates do not commute
    /// modulo the current group, their commutator becomes the next candidate. The derived length
    /// of a solvable subgroup of the symmetric group of degree n is at most `5/2 log_3(n)`, which
    /// bounds the number of attempts.
    pub(super) fn solve(&mut self, generators: &PermSet) -> Result<()> {
        debug!(generators = %generators, "attempting to solve BSGS");

        let generators = generators
            .iter()
            .filter(|gen| !gen.is_identity())
            .cloned()
            .collect::<Vec<_>>();

        let attempts = derived_length_bound(self.degree);
        trace!(attempts, "maximal number of attempts");

        for gen in generators.iter() {
            while !self.strips_completely(gen) {
                trace!(%gen, "generator not in current BSGS");

                let mut w = gen.clone();
                let mut solved = false;

                for attempt in 0..attempts {
                    match self.solve_s_normal_closure(&generators, &w) {
                        Ok(()) => {
                            solved = true;
                            break;
                        }
                        Err((u, v)) => {
                            trace!(attempt, %u, %v, "conjugates do not commute");
                            w = u.commutator(&v);
                        }
                    }
                }

                if !solved {
                    debug!("failed to solve BSGS");
                    return Err(Error::Solve);
                }
            }
        }

        self.redetermine_schreier_structures();

        debug!("solved BSGS");
        Ok(())
    }

    /// Adjoin the normal closure of `w` under `generators`, if its elements pairwise commute modulo
    /// the current group.
    ///
    /// Conjugates of `w` are processed in breadth-first order. Each one outside the current group
    /// is checked against all previously adjoined ones; if its commutator with one of them is not
    /// in the group as it was on entry, the chain is restored and the non-commuting pair returned.
    fn solve_s_normal_closure(
        &mut self,
        generators: &[Perm],
        w: &Perm,
    ) -> std::result::Result<(), (Perm, Perm)> {
        let original = self.clone();

        let mut queue = PermSet::new();
        queue.insert(w.clone());
        let mut adjoined: Vec<Perm> = vec![];

        let mut next = 0;
        while next < queue.len() {
            let g = queue.as_slice()[next].clone();
            next += 1;

            if self.strips_completely(&g) {
                continue;
            }

            for h in adjoined.iter() {
                if !original.strips_completely(&g.commutator(h)) {
                    let h = h.clone();
                    *self = original;
                    return Err((g, h));
                }
            }

            self.solve_adjoin_normalizing_generator(&g);

            for gen in generators {
                queue.insert(g.conjugate_by(gen));
            }
            adjoined.push(g);
        }

        Ok(())
    }

    /// Adjoin an element normalizing the group described by the chain.
    ///
    /// At every level the smallest power of the element mapping the base point into the known
    /// orbit is found. If that power is larger than one, the element enlarges the orbit and is
    /// added to all levels up to this one. The power, divided by the transversal element, fixes
    /// the base point and is carried on to the next level until it becomes the identity.
    fn solve_adjoin_normalizing_generator(&mut self, gen: &Perm) {
        trace!(%gen, "adjoining normalizing generator");

        let mut h = gen.clone();
        let mut i = 0;

        while !h.is_identity() {
            if i == self.base.len() {
                let bp = h
                    .moved_points()
                    .next()
                    .expect("non-trivial element moves a point");
                self.extend_base(bp);
                trace!(base = ?self.base, "adjoined base point");
            }

            let bp = self.base[i];

            let mut power = 1;
            let mut h_power = h.clone();
            while !self.schreier_structures[i].contains(h_power.image(bp)) {
                power += 1;
                h_power = h_power.then(&h);
            }

            let u = self.schreier_structures[i]
                .transversal(h_power.image(bp))
                .expect("orbit contains the image");

            if power > 1 {
                for j in 0..=i {
                    let mut level_generators = self.schreier_structures[j]
                        .labels()
                        .iter()
                        .cloned()
                        .collect::<PermSet>();
                    level_generators.insert(h.clone());
                    self.update_schreier_structure(j, level_generators.as_slice());
                }
                self.strong_generators.insert(h.clone());

                trace!(%h, power, orbit = ?self.schreier_structures[i].nodes(), "enlarged orbit");
            }

            h = h_power.then(&u.inverse());
            i += 1;
        }
    }
}

/// `floor(5/2 log_3(degree))`
fn derived_length_bound(degree: usize) -> usize {
    if degree < 2 {
        return 0;
    }
    (2.5 * (degree as f64).ln() / 3f64.ln()) as usize
}
