use super::*;

use proptest::{prelude::*, *};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::perm::tests::random_perm;

fn cycles(cycles: &[&[El]]) -> Perm {
    Perm::from_cycles(cycles).unwrap()
}

fn perms(generators: &[&[&[El]]]) -> PermSet {
    generators.iter().map(|gen| cycles(gen)).collect()
}

fn s3() -> PermSet {
    perms(&[&[&[0, 1]], &[&[1, 2]]])
}

fn s4() -> PermSet {
    perms(&[&[&[0, 1]], &[&[0, 1, 2, 3]]])
}

fn d4() -> PermSet {
    perms(&[&[&[1, 3]], &[&[0, 1], &[2, 3]]])
}

fn a5() -> PermSet {
    perms(&[&[&[0, 1, 2]], &[&[1, 2, 3]], &[&[2, 3, 4]]])
}

fn s5() -> PermSet {
    perms(&[&[&[0, 1]], &[&[0, 1, 2, 3, 4]]])
}

fn symmetric(degree: El) -> PermSet {
    let mut gens = PermSet::new();
    if degree >= 2 {
        gens.insert(cycles(&[&[0, 1]]));
    }
    if degree >= 3 {
        gens.insert(Perm::from_cycles(&[(0..degree).collect::<Vec<_>>()]).unwrap());
    }
    gens
}

fn factorial(n: u32) -> BigUint {
    (1..=n).map(BigUint::from).product()
}

fn all_options() -> Vec<BsgsOptions> {
    let mut result = vec![];
    for &construction in [
        Construction::SchreierSims,
        Construction::SchreierSimsRandom,
        Construction::Auto,
    ]
    .iter()
    {
        for &transversals in [
            Transversals::Explicit,
            Transversals::SchreierTrees,
            Transversals::ShallowSchreierTrees,
            Transversals::Auto,
        ]
        .iter()
        {
            for &reduce_generators in [false, true].iter() {
                for &lookahead in [1, 16, 1000].iter() {
                    result.push(
                        BsgsOptions::default()
                            .with_construction(construction)
                            .with_transversals(transversals)
                            .with_random_confidence(30)
                            .with_reduce_generators(reduce_generators)
                            .with_schreier_generator_lookahead(lookahead),
                    );
                }
            }
        }
    }
    result
}

fn sorted(mut points: Vec<El>) -> Vec<El> {
    points.sort();
    points
}

/// Checks that every level is consistent with the strong generators.
fn assert_chain_sound(bsgs: &Bsgs, generators: &PermSet) {
    for gen in generators.iter() {
        assert!(bsgs.strips_completely(gen), "{} not in {}", gen, bsgs);
    }
    for gen in bsgs.strong_generators().iter() {
        assert!(bsgs.strips_completely(gen), "{} not in {}", gen, bsgs);
        assert!(!gen.is_identity());
    }

    for i in 0..bsgs.base_len() {
        let stabilizers = bsgs.stabilizers(i);
        for gen in stabilizers.iter() {
            assert!(gen.fixes_all(&bsgs.base()[..i]));
        }

        let orbit = bsgs.orbit(i);
        assert_eq!(orbit[0], bsgs.base_point(i));
        assert_eq!(
            sorted(orbit.clone()),
            sorted(orbit_of(bsgs.base_point(i), stabilizers.as_slice(), None))
        );

        for (&o, u) in orbit.iter().zip(bsgs.transversals(i)) {
            assert_eq!(u.image(bsgs.base_point(i)), o);
            assert!(u.fixes_all(&bsgs.base()[..i]));
        }
    }
}

#[test]
fn s3_chain() {
    let bsgs = Bsgs::new(3, s3(), &BsgsOptions::default()).unwrap();

    assert_eq!(bsgs.base(), &[0, 1]);
    assert_eq!(bsgs.order(), BigUint::from(6u32));
    assert_eq!(sorted(bsgs.orbit(0)), vec![0, 1, 2]);
    assert_eq!(sorted(bsgs.orbit(1)), vec![1, 2]);
    assert_eq!(bsgs.stabilizers(1), perms(&[&[&[1, 2]]]));

    assert!(bsgs.strips_completely(&cycles(&[&[0, 2]])));
    assert!(bsgs.contains(&cycles(&[&[0, 1, 2]])));

    let u = bsgs.transversal(0, 2).unwrap();
    assert_eq!(u.image(0), 2);
    assert_eq!(bsgs.transversal(1, 0), None);

    assert_chain_sound(&bsgs, &s3());
}

#[test]
fn s3_display() {
    let bsgs = Bsgs::new(3, s3(), &BsgsOptions::default()).unwrap();
    assert_eq!(
        format!("{}", bsgs),
        "BASE: [0, 1]; ORBITS: [3, 2]; SGS: {(0 1), (1 2)}"
    );
}

#[test]
fn trivial_group() {
    let generators: PermSet = vec![Perm::new()].into();
    for construction in [
        Construction::SchreierSims,
        Construction::SchreierSimsRandom,
        Construction::Solve,
    ]
    .iter()
    {
        let options = BsgsOptions::default().with_construction(*construction);
        let bsgs = Bsgs::new(4, generators.clone(), &options).unwrap();

        assert!(bsgs.is_trivial());
        assert!(bsgs.base().is_empty());
        assert!(bsgs.strong_generators().is_empty());
        assert_eq!(bsgs.order(), BigUint::from(1u32));
        assert!(bsgs.strips_completely(&Perm::new()));
        assert!(!bsgs.strips_completely(&cycles(&[&[0, 1]])));
        assert_eq!(bsgs.elements().collect::<Vec<_>>(), vec![Perm::new()]);
        assert_eq!(format!("{}", bsgs), "BASE: []; ORBITS: []; SGS: {}");
    }
}

#[test]
fn strip_reports_level() {
    let bsgs = Bsgs::new(4, s3(), &BsgsOptions::default()).unwrap();

    let outside = cycles(&[&[0, 3]]);
    let strip = bsgs.strip(&outside, 0);
    assert_eq!(strip.level, 0);
    assert_eq!(strip.residual, outside);
    assert!(!bsgs.strips_completely(&outside));

    // (0 1)(2 3) strips through both levels but leaves (2 3)
    let strip = bsgs.strip(&cycles(&[&[0, 1], &[2, 3]]), 0);
    assert_eq!(strip.level, 2);
    assert_eq!(strip.residual, cycles(&[&[2, 3]]));
}

#[test]
fn orders_agree() {
    let groups = vec![
        (4, s4(), 24u32),
        (4, d4(), 8),
        (5, a5(), 60),
        (5, s5(), 120),
        (6, symmetric(6), 720),
    ];

    for (degree, generators, order) in groups {
        for options in all_options() {
            let bsgs = Bsgs::new(degree, generators.clone(), &options).unwrap();
            assert_eq!(
                bsgs.order(),
                BigUint::from(order),
                "{} with {:?}",
                generators,
                options
            );
            assert_chain_sound(&bsgs, &generators);
        }
    }
}

#[test]
fn lookahead_does_not_change_group() {
    for &lookahead in [1, 2, 1000].iter() {
        let options = BsgsOptions::default()
            .with_construction(Construction::SchreierSims)
            .with_schreier_generator_lookahead(lookahead);
        let bsgs = Bsgs::new(8, symmetric(8), &options).unwrap();
        assert_eq!(bsgs.order(), factorial(8), "lookahead {}", lookahead);
        assert_chain_sound(&bsgs, &symmetric(8));
    }
}

#[test]
fn shallow_trees_for_deep_orbits() {
    let options = BsgsOptions::default().with_transversals(Transversals::ShallowSchreierTrees);
    let bsgs = Bsgs::new(30, symmetric(30), &options).unwrap();
    assert_eq!(bsgs.order(), factorial(30));
    assert_eq!(bsgs.base_len(), 29);
}

#[test]
fn alternating_group_membership() {
    let bsgs = Bsgs::new(5, a5(), &BsgsOptions::default()).unwrap();
    assert!(!bsgs.contains(&cycles(&[&[0, 1]])));
    assert!(!bsgs.contains(&cycles(&[&[0, 1, 2, 3]])));
    assert!(bsgs.contains(&cycles(&[&[0, 1], &[2, 3]])));
    assert!(bsgs.contains(&cycles(&[&[0, 1, 2, 3, 4]])));
}

#[test]
fn large_symmetric_group() {
    let bsgs = Bsgs::new(12, symmetric(12), &BsgsOptions::default()).unwrap();
    assert_eq!(bsgs.order(), factorial(12));
    assert_eq!(bsgs.base_len(), 11);
}

#[test]
fn solve_solvable_groups() {
    let groups = vec![(3, s3(), 6u32), (4, s4(), 24), (4, d4(), 8)];

    for (degree, generators, order) in groups {
        for &transversals in [
            Transversals::Explicit,
            Transversals::SchreierTrees,
            Transversals::ShallowSchreierTrees,
        ]
        .iter()
        {
            let options = BsgsOptions::default()
                .with_construction(Construction::Solve)
                .with_transversals(transversals);
            let bsgs = Bsgs::new(degree, generators.clone(), &options).unwrap();
            assert_eq!(bsgs.order(), BigUint::from(order), "{}", generators);
            assert_chain_sound(&bsgs, &generators);
        }
    }
}

#[test]
fn solve_cyclic_group() {
    let generators = perms(&[&[&[0, 1, 2, 3, 4, 5, 6]]]);
    let options = BsgsOptions::default().with_construction(Construction::Solve);
    let bsgs = Bsgs::new(7, generators, &options).unwrap();
    assert_eq!(bsgs.order(), BigUint::from(7u32));
    assert_eq!(bsgs.base_len(), 1);
}

#[test]
fn solve_rejects_unsolvable_groups() {
    let options = BsgsOptions::default().with_construction(Construction::Solve);
    assert_eq!(Bsgs::new(5, s5(), &options).unwrap_err(), Error::Solve);
    assert_eq!(Bsgs::new(5, a5(), &options).unwrap_err(), Error::Solve);
}

#[test]
fn point_out_of_range() {
    let generators = perms(&[&[&[0, 1]], &[&[0, 3]]]);
    assert_eq!(
        Bsgs::new(3, generators, &BsgsOptions::default()).unwrap_err(),
        Error::PointOutOfRange {
            point: 3,
            degree: 3
        }
    );
}

#[test]
fn elements_enumerate_group() {
    let bsgs = Bsgs::new(4, s4(), &BsgsOptions::default()).unwrap();

    let elements = bsgs.elements().collect::<Vec<_>>();
    assert_eq!(elements.len(), 24);

    let distinct = elements.iter().cloned().collect::<PermSet>();
    assert_eq!(distinct.len(), 24);

    for element in elements.iter() {
        assert!(bsgs.strips_completely(element));
    }
}

#[test]
fn random_elements_are_members() {
    let bsgs = Bsgs::new(5, a5(), &BsgsOptions::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut seen = PermSet::new();
    for _ in 0..200 {
        let element = bsgs.random_element(&mut rng);
        assert!(bsgs.strips_completely(&element));
        seen.insert(element);
    }
    assert!(seen.len() > 30);
}

#[test]
fn randomized_construction_reproducible() {
    let options = BsgsOptions::default()
        .with_construction(Construction::SchreierSimsRandom)
        .with_seed(17);

    let a = Bsgs::new(6, symmetric(6), &options).unwrap();
    let b = Bsgs::new(6, symmetric(6), &options).unwrap();

    assert_eq!(a.base(), b.base());
    assert_eq!(a.strong_generators(), b.strong_generators());
    assert_eq!(format!("{}", a), format!("{}", b));
}

#[test]
fn remove_generators_keeps_group() {
    let generators = perms(&[
        &[&[0, 1]],
        &[&[1, 2]],
        &[&[2, 3]],
        &[&[0, 2]],
        &[&[0, 1, 2, 3]],
        &[&[1, 3]],
    ]);

    let options = BsgsOptions::default().with_reduce_generators(false);
    let mut bsgs = Bsgs::new(4, generators.clone(), &options).unwrap();
    let before = bsgs.strong_generators().len();
    let orbits = (0..bsgs.base_len())
        .map(|i| sorted(bsgs.orbit(i)))
        .collect::<Vec<_>>();

    bsgs.remove_generators();

    assert!(bsgs.strong_generators().len() < before);
    assert_eq!(bsgs.order(), BigUint::from(24u32));
    for (i, orbit) in orbits.into_iter().enumerate() {
        assert_eq!(sorted(bsgs.orbit(i)), orbit);
    }
    assert_chain_sound(&bsgs, &generators);

    // nothing left to remove
    let reduced = bsgs.strong_generators().clone();
    bsgs.remove_generators();
    assert_eq!(bsgs.strong_generators(), &reduced);
}

#[test]
fn options_defaults() {
    let options = BsgsOptions::default();
    assert_eq!(options.construction, Construction::Auto);
    assert_eq!(options.transversals, Transversals::Auto);
    assert_eq!(options.random_confidence, 10);
    assert_eq!(options.schreier_generator_lookahead, 16);
    assert!(options.reduce_generators);
}

proptest! {
    #[test]
    fn random_groups_sound(
        gens in prop::collection::vec(random_perm(0..8u32), 1..4),
    ) {
        let generators: PermSet = gens.into();
        let bsgs = Bsgs::new(8, generators.clone(), &BsgsOptions::default()).unwrap();
        assert_chain_sound(&bsgs, &generators);

        let order = bsgs.order();
        prop_assert_eq!(factorial(8) % &order, BigUint::from(0u32));

        for &transversals in [Transversals::Explicit, Transversals::ShallowSchreierTrees].iter() {
            let options = BsgsOptions::default().with_transversals(transversals);
            let other = Bsgs::new(8, generators.clone(), &options).unwrap();
            prop_assert_eq!(other.order(), order.clone());
        }

        let options = BsgsOptions::default().with_construction(Construction::Solve);
        if let Ok(solved) = Bsgs::new(8, generators.clone(), &options) {
            prop_assert_eq!(solved.order(), order.clone());
            assert_chain_sound(&solved, &generators);
        }
    }

    #[test]
    fn products_strip_completely(
        gens in prop::collection::vec(random_perm(0..9u32), 1..3),
        word in prop::collection::vec(0..3usize, 0..20),
    ) {
        let generators: PermSet = gens.into();
        let bsgs = Bsgs::new(9, generators.clone(), &BsgsOptions::default()).unwrap();

        let mut product = Perm::new();
        for &i in word.iter() {
            product = product.then(&generators.as_slice()[i % generators.len()]);
        }
        prop_assert!(bsgs.strips_completely(&product));
    }
}
