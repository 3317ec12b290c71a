//! Orbits of points under sets of permutations.
use std::collections::VecDeque;

use crate::action::PointAction;
use crate::error::{Error, Result};
use crate::perm::Perm;
use crate::schreier::SchreierStructure;
use crate::El;

/// Compute the orbit of a point under a set of generators.
///
/// The orbit is closed breadth-first starting at `x`, so the returned points are in order of
/// discovery with `x` first. When a Schreier structure is given it is reset to the root `x` and
/// the generators as labels, and every newly discovered point is recorded together with the
/// point and generator it was reached from. Structures built this way are breadth-first trees.
pub fn orbit_of(x: El, generators: &[Perm], mut ss: Option<&mut dyn SchreierStructure>) -> Vec<El> {
    if let Some(ss) = ss.as_mut() {
        ss.create_root(x);
        ss.create_labels(generators);
    }

    let bound = generators
        .iter()
        .map(Perm::degree)
        .max()
        .unwrap_or(0)
        .max(x as usize + 1);

    let mut seen = vec![false; bound];
    seen[x as usize] = true;

    let mut orbit = vec![x];
    let mut frontier = VecDeque::new();
    frontier.push_back(x);

    while let Some(current) = frontier.pop_front() {
        for (label, gen) in generators.iter().enumerate() {
            let image = gen.image(current);
            if !seen[image as usize] {
                seen[image as usize] = true;
                orbit.push(image);
                frontier.push_back(image);

                if let Some(ss) = ss.as_mut() {
                    ss.create_edge(image, current, label);
                }
            }
        }
    }

    if let Some(ss) = ss {
        ss.finish();
    }

    orbit
}

/// Partition the points {0, ..., degree - 1} into orbits.
///
/// Orbits are ordered by their smallest point. Fixed points form orbits of size one. Fails with
/// [`Error::PointOutOfRange`] if a generator moves a point past the degree.
pub fn orbit_partition(degree: usize, generators: &[Perm]) -> Result<Vec<Vec<El>>> {
    if let Some(gen) = generators.iter().find(|gen| gen.degree() > degree) {
        return Err(Error::PointOutOfRange {
            point: (gen.degree() - 1) as El,
            degree,
        });
    }

    let mut partition = vec![];
    let mut processed = vec![false; degree];

    for x in 0..degree as El {
        if processed[x as usize] {
            continue;
        }
        let orbit = orbit_of(x, generators, None);
        for &y in orbit.iter() {
            processed[y as usize] = true;
        }
        partition.push(orbit);
    }

    Ok(partition)
}

/// Whether `generators` regenerate exactly `orbit` starting from `x`.
///
/// Every reached point is expanded, so this returns false as soon as any generator leads outside
/// of `orbit`. The order of `orbit` is irrelevant.
pub fn generates_orbit<'a, I>(x: El, generators: I, orbit: &[El]) -> bool
where
    I: IntoIterator<Item = &'a Perm>,
    I::IntoIter: Clone,
{
    let generators = generators.into_iter();
    let bound = orbit.iter().cloned().max().map_or(0, |max| max as usize + 1);

    let mut in_orbit = vec![false; bound];
    for &y in orbit {
        in_orbit[y as usize] = true;
    }

    if (x as usize) >= bound || !in_orbit[x as usize] {
        return false;
    }

    let mut found = vec![false; bound];
    found[x as usize] = true;
    let mut remaining = orbit.len() - 1;

    let mut stack = vec![x];
    while let Some(current) = stack.pop() {
        for gen in generators.clone() {
            let image = gen.image(current) as usize;
            if image >= bound || !in_orbit[image] {
                return false;
            }
            if !found[image] {
                found[image] = true;
                remaining -= 1;
                stack.push(image as El);
            }
        }
    }

    remaining == 0
}
