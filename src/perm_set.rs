//! Deduplicated collections of permutations.
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::iter::FromIterator;
use std::slice;

use crate::action::PointAction;
use crate::perm::Perm;
use crate::El;

/// A set of permutations.
///
/// No two members compare equal. Members keep their insertion order, which makes every
/// algorithm consuming a `PermSet` reproducible.
///
/// The degree of a set is the largest degree among its members, so a set of permutations can
/// always be viewed as acting on a common point set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PermSet {
    perms: Vec<Perm>,
}

impl PermSet {
    /// The empty set.
    pub fn new() -> PermSet {
        PermSet::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.perms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    /// Whether the set contains no permutation besides possibly the identity.
    pub fn is_trivial(&self) -> bool {
        self.perms.iter().all(Perm::is_identity)
    }

    /// The largest degree among all members, zero for an empty set.
    pub fn degree(&self) -> usize {
        self.perms.iter().map(Perm::degree).max().unwrap_or(0)
    }

    /// Add a permutation. Returns false if an equal permutation was already present.
    pub fn insert(&mut self, perm: Perm) -> bool {
        if self.contains(&perm) {
            false
        } else {
            self.perms.push(perm);
            true
        }
    }

    /// Remove a permutation. Returns whether it was present.
    pub fn remove(&mut self, perm: &Perm) -> bool {
        match self.perms.iter().position(|p| p == perm) {
            Some(index) => {
                self.perms.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, perm: &Perm) -> bool {
        self.perms.iter().any(|p| p == perm)
    }

    pub fn iter(&self) -> slice::Iter<Perm> {
        self.perms.iter()
    }

    /// The members as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Perm] {
        &self.perms
    }

    pub fn into_vec(self) -> Vec<Perm> {
        self.perms
    }

    /// Keep only the members for which the predicate holds.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Perm) -> bool,
    {
        self.perms.retain(f)
    }

    /// The smallest point moved by any member.
    pub fn smallest_moved_point(&self) -> Option<El> {
        self.perms
            .iter()
            .filter_map(|perm| perm.moved_points().next())
            .min()
    }

    /// The largest point moved by any member.
    pub fn largest_moved_point(&self) -> Option<El> {
        self.perms
            .iter()
            .filter(|perm| !perm.is_identity())
            .map(|perm| (perm.degree() - 1) as El)
            .max()
    }

    /// Relabel points so that the points moved by some member become 0, 1, ..., m - 1.
    ///
    /// Each moved point takes the lowest index that is free at that time, where an index is free
    /// if no member moves it or its point has been relabeled already. Since this preserves the
    /// relative order of moved points, applying it a second time changes nothing.
    ///
    /// Returns the relabeling, indexed by the old point. Points not moved by any member keep
    /// their own index in the returned mapping.
    pub fn minimize_degree(&mut self) -> Vec<El> {
        let degree = self.degree();
        let mut mapping: Vec<El> = (0..degree as El).collect();

        let mut moved = vec![false; degree];
        for perm in self.perms.iter() {
            for el in perm.moved_points() {
                moved[el as usize] = true;
            }
        }

        let mut free = BinaryHeap::new();
        for el in 0..degree as El {
            if !moved[el as usize] {
                free.push(Reverse(el));
                continue;
            }
            match free.peek() {
                Some(&Reverse(target)) if target < el => {
                    free.pop();
                    mapping[el as usize] = target;
                    free.push(Reverse(el));
                }
                _ => {}
            }
        }

        for perm in self.perms.iter_mut() {
            let mut images: Vec<El> = (0..perm.degree() as El).collect();
            for el in perm.moved_points() {
                images[mapping[el as usize] as usize] = mapping[perm.image(el) as usize];
            }
            *perm = Perm::from_vec(images).expect("relabeling preserves bijectivity");
        }

        mapping
    }
}

impl<'a> IntoIterator for &'a PermSet {
    type Item = &'a Perm;
    type IntoIter = slice::Iter<'a, Perm>;

    fn into_iter(self) -> Self::IntoIter {
        self.perms.iter()
    }
}

impl IntoIterator for PermSet {
    type Item = Perm;
    type IntoIter = std::vec::IntoIter<Perm>;

    fn into_iter(self) -> Self::IntoIter {
        self.perms.into_iter()
    }
}

impl FromIterator<Perm> for PermSet {
    fn from_iter<I>(iter: I) -> PermSet
    where
        I: IntoIterator<Item = Perm>,
    {
        let mut set = PermSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Perm> for PermSet {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Perm>,
    {
        for perm in iter {
            self.insert(perm);
        }
    }
}

impl From<Vec<Perm>> for PermSet {
    fn from(perms: Vec<Perm>) -> PermSet {
        perms.into_iter().collect()
    }
}

/// Members are listed in sorted order, so equal sets render identically.
impl fmt::Display for PermSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sorted = self.perms.iter().collect::<Vec<_>>();
        sorted.sort();
        f.write_str("{")?;
        let mut scratch = vec![];
        for (i, perm) in sorted.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            perm.format_with_scratch(f, &mut scratch)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for PermSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
