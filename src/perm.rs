//! Permutations of finite sets.
use std::cmp::{max, Ordering};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::replace;

use num_integer::Integer;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::action::{LeftAction, PointAction, RightAction};
use crate::El;

/// A permutation of a finite set.
///
/// Permutations act on the points {0, ..., n-1}. Every permutation is implicitly extended to all
/// of [`El`] by fixing the points past its stored images, so any two permutations can be composed
/// and compared regardless of the degree they were created with.
///
/// Internally a permutation is stored as the images of {0, ..., n - 1} where n - 1 is the largest
/// moved point. The identity therefore needs no storage at all.
#[derive(Default)]
pub struct Perm {
    // Not a vector, this way all allocated elements are valid images and growing or shrinking
    // only updates `length`.
    perm: Box<[El]>,
    length: usize,
}

impl Perm {
    /// The identity permutation.
    pub fn new() -> Perm {
        Perm::default()
    }

    fn initialize_excess_capacity(perm: &mut Vec<El>) {
        while perm.len() < perm.capacity() {
            // Overflow here is ok as we never access elements past self.length
            perm.push(perm.len() as El)
        }
    }

    /// Create a permutation from a vector containing the images of 0..n.
    ///
    /// Returns None if the vector does not correspond to a permutation.
    pub fn from_vec(mut perm: Vec<El>) -> Option<Perm> {
        assert!(perm.len() <= El::max_value() as usize);
        let mut seen = vec![false; perm.len()];

        for &p_i in perm.iter() {
            let p_i = p_i as usize;
            if p_i >= perm.len() || seen[p_i] {
                return None;
            }
            seen[p_i] = true;
        }

        let length = perm.len();

        Self::initialize_excess_capacity(&mut perm);

        let mut result = Perm {
            perm: perm.into_boxed_slice(),
            length,
        };

        result.shrink();

        Some(result)
    }

    /// Create a permutation from a product of cycles.
    ///
    /// The cycles are applied from left to right, so they may overlap. Returns None if a cycle
    /// repeats a point.
    pub fn from_cycles<C>(cycles: &[C]) -> Option<Perm>
    where
        C: AsRef<[El]>,
    {
        let mut result = Perm::new();
        for cycle in cycles {
            let cycle = cycle.as_ref();
            for (i, a) in cycle.iter().enumerate() {
                if cycle[..i].contains(a) {
                    return None;
                }
            }
            let mut cycle_perm = Perm::new();
            for window in cycle.windows(2) {
                cycle_perm.right_transpose(window[1], window[0]);
            }
            result = result.then(&cycle_perm);
        }
        Some(result)
    }

    fn extend_for(&mut self, el: El) {
        self.extend_to(el as usize + 1);
    }

    fn extend_to(&mut self, length: usize) {
        if length > self.length {
            self.resize(length);
        }
    }

    fn resize(&mut self, length: usize) {
        if length > self.perm.len() {
            // Realloc with Vec's resizing strategy
            let old_length = self.perm.len();
            let mut perm = replace(&mut self.perm, Box::new([])).into_vec();
            perm.reserve(length - old_length);

            Self::initialize_excess_capacity(&mut perm);

            self.perm = perm.into_boxed_slice();
        }
        // "clear" everything past the new length up to the old length
        if self.length > length {
            for (i, p_i) in self.perm[length..self.length].iter_mut().enumerate() {
                *p_i = (length + i) as El;
            }
        }
        self.length = length;
    }

    fn shrink(&mut self) {
        while self.length > 0 && self.perm[self.length - 1] == (self.length - 1) as El {
            self.length -= 1;
        }
    }

    fn perm_slice(&self) -> &[El] {
        &self.perm[..self.length]
    }

    /// The images of 0..degree.
    pub fn images(&self) -> &[El] {
        self.perm_slice()
    }

    /// One more than the largest moved point, zero for the identity.
    pub fn degree(&self) -> usize {
        self.length
    }

    /// Whether this is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.length == 0
    }

    /// Whether this is a product of an even number of transpositions.
    pub fn is_even(&self) -> bool {
        self.cycles().map(|cycle| cycle.count() - 1).sum::<usize>() % 2 == 0
    }

    /// Iterator over the points moved by this permutation, in increasing order.
    pub fn moved_points<'a>(&'a self) -> impl Iterator<Item = El> + 'a {
        self.perm_slice()
            .iter()
            .enumerate()
            .filter(|&(i, &p_i)| i as El != p_i)
            .map(|(i, _)| i as El)
    }

    /// Apply a transposition of two elements on the right.
    pub fn right_transpose(&mut self, a: El, b: El) {
        self.extend_for(max(a, b));
        self.perm.swap(a as usize, b as usize);
        self.shrink();
    }

    /// The permutation that first applies `self` and then `other`.
    pub fn then(&self, other: &Perm) -> Perm {
        let mut result = self.clone();
        other.right_apply_to(&mut result);
        result
    }

    /// The inverse of this permutation.
    pub fn inverse(&self) -> Perm {
        let mut result = Perm::new();
        self.inverse_into(&mut result);
        result
    }

    /// Overwrite `target` with the inverse of this permutation, reusing its allocation.
    pub fn inverse_into(&self, target: &mut Perm) {
        target.resize(self.perm.len());
        for (i, &p_i) in self.perm.iter().enumerate() {
            target.perm[p_i as usize] = i as El;
        }
        // No need to shrink, support of inverse stays the same
        target.length = self.length;
    }

    /// The conjugate `other^-1 self other`, i.e. `self` with its points relabeled by `other`.
    pub fn conjugate_by(&self, other: &Perm) -> Perm {
        other.inverse().then(self).then(other)
    }

    /// The commutator `self^-1 other^-1 self other`.
    pub fn commutator(&self, other: &Perm) -> Perm {
        self.inverse()
            .then(&other.inverse())
            .then(self)
            .then(other)
    }

    /// A power of this permutation.
    ///
    /// This performs exponentiation by squaring. Negative exponents are supported.
    pub fn pow<E>(&self, exponent: E) -> Perm
    where
        E: Integer + ToPrimitive + FromPrimitive,
    {
        let neg = exponent < E::zero();
        let exp = if neg { E::zero() - exponent } else { exponent };

        let result = match exp.to_usize() {
            Some(0) => Perm::new(),
            Some(1) => self.clone(),
            Some(2) => self.then(self),
            _ => {
                let two = E::from_usize(2).expect("2 must be representable");
                let odd = exp.is_odd();
                let half = self.pow(exp / two);
                let square = half.then(&half);
                if odd {
                    square.then(self)
                } else {
                    square
                }
            }
        };

        if neg {
            result.inverse()
        } else {
            result
        }
    }

    /// Return the cycle starting at an element.
    ///
    /// Returns a 1-cycle when the element is not in the support of this permutation.
    pub fn cycle_at(&self, el: El) -> Cycle {
        Cycle {
            perm: self,
            pos: Some(el),
            start: el,
        }
    }

    /// Returns an iterator over all proper cycles of a permutation.
    ///
    /// The returned iterator does not produce any 1-cycles.
    pub fn cycles(&self) -> Cycles {
        self.cycles_with_scratch(Default::default())
    }

    /// Return an iterator over all proper cycles of a permutation. Use existing scratch space.
    ///
    /// The ownership of the scratch space is passed to the returned iterator and can be recovered
    /// by [`Cycles::into_scratch`].
    pub fn cycles_with_scratch(&self, mut scratch: Vec<bool>) -> Cycles {
        scratch.clear();
        scratch.resize(self.perm.len(), false);
        Cycles {
            perm: self,
            seen: scratch,
            pos: 0,
        }
    }

    /// Emit this permutation to a [`Formatter`][fmt::Formatter]. Use existing scratch space.
    pub fn format_with_scratch(
        &self,
        f: &mut fmt::Formatter,
        scratch: &mut Vec<bool>,
    ) -> fmt::Result {
        let mut cycles = self.cycles_with_scratch(replace(scratch, Default::default()));

        let mut empty = true;

        while let Some(cycle) = cycles.next() {
            empty = false;
            fmt::Display::fmt(&cycle, f)?;
        }

        *scratch = cycles.into_scratch();

        if empty {
            f.write_str("()")?;
        }

        Ok(())
    }
}

impl Clone for Perm {
    fn clone(&self) -> Perm {
        Perm {
            perm: self.perm.clone(),
            length: self.length,
        }
    }

    fn clone_from(&mut self, other: &Perm) {
        self.resize(other.length);
        self.perm[..other.length].copy_from_slice(other.perm_slice());
    }
}

/// Application of a permutation to an element.
impl LeftAction<El> for Perm {
    type Scratch = ();

    fn left_apply_to_with_scratch(&self, el: &mut El, _: &mut ()) {
        *el = self.perm.get(*el as usize).cloned().unwrap_or(*el);
    }
}

/// Composition of a permutation on the right.
///
/// Unlike composition on the left, this requires no scratch space.
impl RightAction<Perm> for Perm {
    type Scratch = ();

    fn right_apply_to_with_scratch(&self, perm: &mut Perm, _: &mut ()) {
        perm.extend_to(self.perm.len());
        for el in perm.perm.iter_mut() {
            *el = self.image(*el);
        }
        perm.shrink();
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_with_scratch(f, &mut Default::default())
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_with_scratch(f, &mut Default::default())
    }
}

impl PartialEq for Perm {
    fn eq(&self, other: &Perm) -> bool {
        self.perm_slice() == other.perm_slice()
    }
}

impl Eq for Perm {}

impl Hash for Perm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.perm_slice().hash(state)
    }
}

impl PartialOrd for Perm {
    fn partial_cmp(&self, other: &Perm) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order on the image sequences, with the identity first.
impl Ord for Perm {
    fn cmp(&self, other: &Perm) -> Ordering {
        self.length
            .cmp(&other.length)
            .then_with(|| self.perm_slice().cmp(other.perm_slice()))
    }
}

/// Iterator over the elements of a permutation's cycle.
#[derive(Clone)]
pub struct Cycle<'a> {
    perm: &'a Perm,
    pos: Option<El>,
    start: El,
}

impl<'a> Iterator for Cycle<'a> {
    type Item = El;

    fn next(&mut self) -> Option<El> {
        self.pos.map(|pos| {
            let next = self.perm.image(pos);
            self.pos = if next == self.start { None } else { Some(next) };

            pos
        })
    }
}

impl<'a> fmt::Display for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for el in self.clone() {
            f.write_str(if first { "(" } else { " " })?;
            first = false;
            fmt::Display::fmt(&el, f)?;
        }
        f.write_str(if first { "()" } else { ")" })
    }
}

impl<'a> fmt::Debug for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Iterator over the cycles of a permutation.
#[derive(Clone)]
pub struct Cycles<'a> {
    perm: &'a Perm,
    seen: Vec<bool>,
    pos: El,
}

impl<'a> Cycles<'a> {
    /// Recover the scratch space needed for efficient iteration over the cycles of a permutation.
    pub fn into_scratch(self) -> Vec<bool> {
        self.seen
    }
}

impl<'a> Iterator for Cycles<'a> {
    type Item = Cycle<'a>;

    fn next(&mut self) -> Option<Cycle<'a>> {
        loop {
            if self.pos as usize >= self.perm.length {
                return None;
            } else if self.seen[self.pos as usize] || self.perm.fixes(self.pos) {
                self.pos += 1;
            } else {
                let cycle = self.perm.cycle_at(self.pos);
                for el in cycle.clone() {
                    self.seen[el as usize] = true;
                }
                return Some(cycle);
            }
        }
    }
}
