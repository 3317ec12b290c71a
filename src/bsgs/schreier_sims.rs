//! Schreier-Sims, deterministic and randomized.
use tracing::{debug, trace};

use crate::action::PointAction;
use crate::bsgs::{Bsgs, Strip};
use crate::perm_set::PermSet;
use crate::random::ProductReplacement;
use crate::schreier_generator_queue::SchreierGeneratorQueue;

impl Bsgs {
    /// Deterministic Schreier-Sims.
    ///
    /// Levels are processed from the last to the first. All Schreier generators of a level are
    /// stripped through the levels below it. A generator that does not strip completely is added
    /// to every level it belongs to, extending the base if it fixes all base points, and
    /// processing continues at the deepest changed level. Once the first level's Schreier
    /// generators all strip, the chain is complete.
    pub(super) fn schreier_sims(&mut self, generators: PermSet, lookahead: usize) {
        debug!("executing Schreier-Sims");

        let mut level_generators = self.schreier_sims_init(generators);
        let mut queues = (0..self.base.len())
            .map(|_| SchreierGeneratorQueue::new(lookahead))
            .collect::<Vec<_>>();

        // number of levels still to verify; the level being verified is `remaining - 1`
        let mut remaining = self.base.len();

        'levels: while remaining > 0 {
            let i = remaining - 1;
            queues[i].update(
                level_generators[i].as_slice(),
                self.schreier_structures[i].as_ref(),
            );

            while let Some(schreier_generator) = queues[i].next(self.schreier_structures[i].as_ref())
            {
                let Strip { residual, level } = self.strip(&schreier_generator, i + 1);

                if level == self.base.len() && residual.is_identity() {
                    continue;
                }

                trace!(
                    %schreier_generator,
                    %residual,
                    stopped_at = level,
                    "Schreier generator does not strip"
                );

                if level == self.base.len() {
                    let bp = residual
                        .moved_points()
                        .next()
                        .expect("non-trivial residual moves a point");
                    self.extend_base(bp);
                    level_generators.push(PermSet::new());
                    queues.push(SchreierGeneratorQueue::new(lookahead));

                    trace!(base = ?self.base, "adjoined base point");
                }

                for j in i + 1..=level {
                    level_generators[j].insert(residual.clone());
                    self.update_schreier_structure(j, level_generators[j].as_slice());
                    queues[j].invalidate();

                    trace!(
                        updated = j,
                        generators = %level_generators[j],
                        orbit = ?self.schreier_structures[j].nodes(),
                        "updated level"
                    );
                }

                remaining = level + 1;
                continue 'levels;
            }

            remaining -= 1;
        }

        self.schreier_sims_finish();

        for gen in self.strong_generators.iter() {
            assert!(
                self.strips_completely(gen),
                "incomplete stabilizer chain after Schreier-Sims: {} does not strip, {}",
                gen,
                self
            );
        }
    }

    /// Randomized Schreier-Sims.
    ///
    /// Strips random group elements and adds every non-trivial residual to the levels it belongs
    /// to. Stops after `confidence` consecutive elements strip completely.
    pub(super) fn schreier_sims_random(&mut self, generators: PermSet, confidence: usize, seed: u64) {
        debug!(confidence, seed, "executing randomized Schreier-Sims");

        let mut level_generators = self.schreier_sims_init(generators);

        if self.strong_generators.is_empty() {
            self.schreier_sims_finish();
            return;
        }

        let mut random = ProductReplacement::new(self.strong_generators.as_slice(), seed);

        let mut stripped = 0;
        while stripped < confidence {
            let element = random.next_element();
            let Strip { residual, level } = self.strip(&element, 0);

            if level == self.base.len() {
                if residual.is_identity() {
                    stripped += 1;
                    continue;
                }

                let bp = residual
                    .moved_points()
                    .next()
                    .expect("non-trivial residual moves a point");
                self.extend_base(bp);
                level_generators.push(PermSet::new());

                trace!(base = ?self.base, "adjoined base point");
            }

            trace!(%element, %residual, stopped_at = level, "random element does not strip");

            // The first level is generated by all generators already
            for j in 1..=level {
                level_generators[j].insert(residual.clone());
                self.update_schreier_structure(j, level_generators[j].as_slice());
            }

            stripped = 0;
        }

        self.schreier_sims_finish();
    }

    /// Drop trivial generators, pick an initial base such that no generator fixes all of it and
    /// build every level from the generators fixing the preceding base points.
    ///
    /// Returns the generators of every level.
    fn schreier_sims_init(&mut self, mut generators: PermSet) -> Vec<PermSet> {
        generators.retain(|gen| !gen.is_identity());

        for gen in generators.iter() {
            if gen.fixes_all(&self.base) {
                let bp = gen
                    .moved_points()
                    .next()
                    .expect("non-trivial generator moves a point");
                self.extend_base(bp);
            }
        }

        self.strong_generators = generators;

        let mut level_generators = vec![];
        for i in 0..self.base.len() {
            let stabilizers = self.stabilizers(i);
            self.update_schreier_structure(i, stabilizers.as_slice());
            level_generators.push(stabilizers);
        }

        debug!(
            base = ?self.base,
            generators = %self.strong_generators,
            "initial base"
        );

        level_generators
    }

    /// Collect the strong generating set from all levels.
    fn schreier_sims_finish(&mut self) {
        let mut strong_generators = PermSet::new();
        for ss in self.schreier_structures.iter() {
            strong_generators.extend(ss.labels().iter().cloned());
        }
        self.strong_generators = strong_generators;

        self.redetermine_schreier_structures();
    }
}
