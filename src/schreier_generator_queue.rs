//! Lazy enumeration of Schreier generators.
use std::collections::VecDeque;

use crate::action::PointAction;
use crate::perm::Perm;
use crate::schreier::SchreierStructure;
use crate::El;

/// Enumerates the Schreier generators of one level of a stabilizer chain.
///
/// For an orbit point `beta`, a generator `s` and transversal elements `u`, the Schreier generator
/// is `u(beta) s u(beta^s)^-1`. These generate the stabilizer of the level's base point. The
/// queue walks orbit points in their recorded order and generators in their given order,
/// skipping generators that are the identity by construction, and computes at most `lookahead`
/// of them ahead of consumption.
///
/// A queue keeps its position until it is [invalidated](SchreierGeneratorQueue::invalidate), so a
/// caller can interrupt consumption and later resume where it left off. After invalidation the
/// next [`update`](SchreierGeneratorQueue::update) restarts the enumeration with the level's
/// current generators and orbit.
#[derive(Clone, Debug)]
pub struct SchreierGeneratorQueue {
    lookahead: usize,
    valid: bool,
    exhausted: bool,
    generators: Vec<Perm>,
    orbit: Vec<El>,
    orbit_pos: usize,
    generator_pos: usize,
    u_beta: Perm,
    buffer: VecDeque<Perm>,
}

impl SchreierGeneratorQueue {
    /// An invalid queue computing at most `lookahead` generators ahead.
    pub fn new(lookahead: usize) -> SchreierGeneratorQueue {
        SchreierGeneratorQueue {
            lookahead: lookahead.max(1),
            valid: false,
            exhausted: true,
            generators: vec![],
            orbit: vec![],
            orbit_pos: 0,
            generator_pos: 0,
            u_beta: Perm::new(),
            buffer: VecDeque::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the level's generators or orbit as changed.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Restart the enumeration if the queue was invalidated.
    pub fn update(&mut self, generators: &[Perm], ss: &dyn SchreierStructure) {
        if self.valid {
            return;
        }

        self.generators = generators.to_vec();
        self.orbit = ss.nodes();
        self.orbit_pos = 0;
        self.generator_pos = 0;
        self.u_beta = Perm::new();
        self.buffer.clear();
        self.exhausted = self.generators.is_empty() || self.orbit.is_empty();
        if !self.exhausted {
            self.u_beta = transversal(ss, self.orbit[0]);
        }
        self.valid = true;
    }

    /// The next Schreier generator, None once all have been produced.
    pub fn next(&mut self, ss: &dyn SchreierStructure) -> Option<Perm> {
        if self.buffer.is_empty() {
            self.fill(ss);
        }
        self.buffer.pop_front()
    }

    fn fill(&mut self, ss: &dyn SchreierStructure) {
        while self.buffer.len() < self.lookahead && !self.exhausted {
            let beta = self.orbit[self.orbit_pos];
            let gen = &self.generators[self.generator_pos];

            let u_beta_gen = self.u_beta.then(gen);
            let u_image = transversal(ss, gen.image(beta));

            if u_beta_gen != u_image {
                self.buffer.push_back(u_beta_gen.then(&u_image.inverse()));
            }

            self.advance(ss);
        }
    }

    fn advance(&mut self, ss: &dyn SchreierStructure) {
        self.generator_pos += 1;
        if self.generator_pos < self.generators.len() {
            return;
        }
        self.generator_pos = 0;
        self.orbit_pos += 1;
        if self.orbit_pos < self.orbit.len() {
            self.u_beta = transversal(ss, self.orbit[self.orbit_pos]);
        } else {
            self.exhausted = true;
        }
    }
}

fn transversal(ss: &dyn SchreierStructure, node: El) -> Perm {
    ss.transversal(node)
        .expect("Schreier structure covers the orbit it was built from")
}
