//! Random group elements by product replacement.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::orbit::orbit_of;
use crate::perm::Perm;

/// Minimal number of generator slots.
pub const DEFAULT_SLOTS: usize = 10;
/// Number of steps discarded after seeding the slots.
pub const DEFAULT_WARMUP: usize = 20;

/// Generates approximately uniformly distributed random elements of the group generated by a set
/// of permutations.
///
/// The state is a list of generator slots, filled by repeating the given generators, and an
/// accumulator. Each step replaces a random slot by its product with another random slot or that
/// slot's inverse, on a random side, and multiplies the accumulator by the new slot value. The
/// accumulator is the returned element.
///
/// All randomness comes from a seeded [`StdRng`], so a fixed seed yields a fixed sequence.
///
/// The random elements also drive Monte Carlo tests recognizing symmetric and alternating groups,
/// see [`test_altsym`](ProductReplacement::test_altsym).
#[derive(Clone, Debug)]
pub struct ProductReplacement {
    generators: Vec<Perm>,
    slots: Vec<Perm>,
    accumulator: Perm,
    rng: StdRng,
}

impl ProductReplacement {
    /// Use the default number of slots and warmup steps.
    pub fn new(generators: &[Perm], seed: u64) -> ProductReplacement {
        ProductReplacement::with_parameters(generators, seed, DEFAULT_SLOTS, DEFAULT_WARMUP)
    }

    /// With no generators, only the identity is produced.
    pub fn with_parameters(
        generators: &[Perm],
        seed: u64,
        slots: usize,
        warmup: usize,
    ) -> ProductReplacement {
        let count = slots.max(generators.len()).max(2);
        let slots = if generators.is_empty() {
            vec![]
        } else {
            generators.iter().cycle().take(count).cloned().collect()
        };

        let mut pr = ProductReplacement {
            generators: generators.to_vec(),
            slots,
            accumulator: Perm::new(),
            rng: StdRng::seed_from_u64(seed),
        };

        for _ in 0..warmup {
            pr.next_element();
        }

        pr
    }

    /// The next random element.
    pub fn next_element(&mut self) -> Perm {
        if self.slots.is_empty() {
            return Perm::new();
        }

        let s = self.rng.gen_range(0..self.slots.len());
        let t = loop {
            let t = self.rng.gen_range(0..self.slots.len());
            if t != s {
                break t;
            }
        };

        let factor = if self.rng.gen::<bool>() {
            self.slots[t].clone()
        } else {
            self.slots[t].inverse()
        };

        if self.rng.gen::<bool>() {
            self.slots[s] = self.slots[s].then(&factor);
            self.accumulator = self.accumulator.then(&self.slots[s]);
        } else {
            self.slots[s] = factor.then(&self.slots[s]);
            self.accumulator = self.slots[s].then(&self.accumulator);
        }

        self.accumulator.clone()
    }
}

impl ProductReplacement {
    /// Whether the generators generate the full symmetric group of their degree.
    ///
    /// A true result is always correct. A false result is wrong with probability at most
    /// `epsilon`.
    pub fn test_symmetric(&mut self, epsilon: f64) -> bool {
        self.test_altsym(epsilon) && !self.generators_even()
    }

    /// Whether the generators generate the alternating group of their degree.
    ///
    /// A true result is always correct. A false result is wrong with probability at most
    /// `epsilon`.
    pub fn test_alternating(&mut self, epsilon: f64) -> bool {
        self.test_altsym(epsilon) && self.generators_even()
    }

    /// Whether the generators generate the alternating or the symmetric group of their degree
    /// `n`, the largest moved point plus one.
    ///
    /// The group must be transitive. Then random elements are searched for a cycle of prime
    /// length `p` with `n/2 < p < n - 2`. A suitable power of such an element is a `p`-cycle, and
    /// by Jordan's theorem a transitive group containing one contains the alternating group. The
    /// number of elements tried is chosen such that for the alternating or symmetric group the
    /// search fails with probability at most `epsilon`.
    ///
    /// The test needs a degree of at least 8 and returns false below that.
    pub fn test_altsym(&mut self, epsilon: f64) -> bool {
        assert!(epsilon > 0.0 && epsilon < 1.0, "epsilon must be in (0, 1)");

        let n = self.generators.iter().map(Perm::degree).max().unwrap_or(0);
        if n < 8 {
            return false;
        }

        if orbit_of(0, &self.generators, None).len() != n {
            return false;
        }

        // proportion of elements with a suitable cycle is at least this
        let factor = if n <= 16 { 0.23 } else { 0.39 };
        let density = factor / (n as f64).ln();
        let iterations = (-epsilon.ln() / density).ceil() as usize;

        for _ in 0..iterations {
            let element = self.next_element();
            let found = element.cycles().any(|cycle| {
                let p = cycle.count();
                2 * p > n && p + 2 < n && is_prime(p)
            });
            if found {
                return true;
            }
        }

        false
    }

    fn generators_even(&self) -> bool {
        self.generators.iter().all(Perm::is_even)
    }
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

impl Iterator for ProductReplacement {
    type Item = Perm;

    fn next(&mut self) -> Option<Perm> {
        Some(self.next_element())
    }
}
