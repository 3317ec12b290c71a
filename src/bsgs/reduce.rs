//! Removal of redundant strong generators.
use tracing::{debug, trace};

use crate::action::PointAction;
use crate::bsgs::Bsgs;
use crate::orbit::generates_orbit;

impl Bsgs {
    /// Remove strong generators without changing the group or any level of the chain.
    ///
    /// Levels are processed from the last to the first. At level `i` the candidates for removal
    /// are the strong generators fixing the first `i` base points but not the `i`-th one. A
    /// candidate is dropped if the remaining generators of the level still generate its orbit.
    /// As the deeper stabilizers are unaffected by this, the level's stabilizer keeps its order.
    /// A level with a single candidate is skipped, as that candidate is required.
    pub fn remove_generators(&mut self) {
        let before = self.strong_generators.len();

        for i in (0..self.base.len()).rev() {
            let bp = self.base[i];
            let orbit = self.orbit(i);

            let candidates = self
                .stabilizers(i)
                .into_iter()
                .filter(|gen| !gen.fixes(bp))
                .collect::<Vec<_>>();

            if candidates.len() < 2 {
                continue;
            }

            for candidate in candidates {
                let stabilizers = self.stabilizers(i);
                let remaining = stabilizers.iter().filter(|gen| **gen != candidate);

                if generates_orbit(bp, remaining, &orbit) {
                    trace!(level = i, %candidate, "removing redundant strong generator");
                    self.strong_generators.remove(&candidate);
                }
            }
        }

        self.redetermine_schreier_structures();

        debug!(
            before,
            after = self.strong_generators.len(),
            "removed redundant strong generators"
        );
    }
}
