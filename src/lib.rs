//! Stabilizer chains for permutation groups
//!
//! This crate computes compact, queryable representations of permutation groups given by
//! generators: a base and strong generating set (BSGS). From a BSGS the order of a group,
//! membership of arbitrary permutations and the elements themselves are easily obtained, even
//! when the group is far too large to enumerate.
//!
//! The entry point is [`bsgs::Bsgs`], which can be built by deterministic or randomized
//! Schreier-Sims or, for solvable groups, by adjoining normalizing generators. The underlying orbit
//! computations in [`orbit`] and the transversal storage strategies in [`schreier`] are usable on
//! their own.
//!
//! All points are non-negative integers; a group of degree n acts on {0, ..., n-1}.
pub mod action;
pub mod bsgs;
pub mod error;
pub mod orbit;
pub mod perm;
pub mod perm_set;
pub mod random;
pub mod schreier;
pub mod schreier_generator_queue;

pub use crate::bsgs::{Bsgs, BsgsOptions, Construction, Transversals};
pub use crate::error::{Error, Result};
pub use crate::perm::Perm;
pub use crate::perm_set::PermSet;

/// Set element.
///
/// Set elements are represented by non-negative integers (`u32`).
pub type El = u32;
