use sat_symmetry::symmetry::check::{is_symmetry, preserves};
use sat_symmetry::symmetry::cnf::Cnf;
use sat_symmetry::symmetry::config::{DetectorConfig, Mode};
use sat_symmetry::symmetry::detector::{Symmetry, SymmetryDetector, SymmetryReport};
use sat_symmetry::symmetry::dimacs::parse_str;
use sat_symmetry::symmetry::literal::{Literal, Variable};
use sat_symmetry::symmetry::occurrence::OccurrenceIndex;
use sat_symmetry::symmetry::substitution::Substitution;
use std::collections::BTreeSet;

fn detect(cnf: &Cnf, config: DetectorConfig) -> SymmetryReport {
    SymmetryDetector::new(cnf.clone(), config).run()
}

/// Every combination of the heuristic switches on top of `base`.
fn heuristic_configs(base: DetectorConfig) -> Vec<DetectorConfig> {
    (0..16u8)
        .map(|bits| DetectorConfig {
            variable_sorting: bits & 1 != 0,
            sort_clauses: bits & 2 != 0,
            sort_literals: bits & 4 != 0,
            clause_swapping: bits & 8 != 0,
            ..base
        })
        .collect()
}

/// Reported negations and pairs, with pairs ordered by variable.
fn normalised(symmetries: &[Symmetry]) -> BTreeSet<(Variable, Variable)> {
    symmetries
        .iter()
        .map(|s| match s {
            Symmetry::Negation(v) => (*v, *v),
            Symmetry::Pair(v1, v2) => ((*v1).min(*v2), (*v1).max(*v2)),
            Symmetry::Group(_) => panic!("groups are not expected here"),
        })
        .collect()
}

/// Random formula over `num_vars` variables. Clauses never repeat a variable.
/// With `close_under` set, the image of every clause under that substitution
/// is added, so the formula has at least that symmetry.
fn random_cnf(
    rng: &mut fastrand::Rng,
    num_vars: Variable,
    close_under: Option<Substitution>,
) -> Cnf {
    let num_clauses = rng.usize(1..=8);
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for _ in 0..num_clauses {
        let len = rng.usize(1..=3usize.min(num_vars as usize));
        let mut vars: Vec<Variable> = Vec::with_capacity(len);
        while vars.len() < len {
            let var = rng.u32(1..=num_vars);
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        let clause: Vec<i32> = vars
            .into_iter()
            .map(|v| Literal::new(v, rng.bool()).to_i32())
            .collect();
        clauses.push(clause);
    }

    if let Some(substitution) = close_under {
        let images: Vec<Vec<i32>> = clauses
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|&lit| substitution.apply(Literal::from(lit)).to_i32())
                    .collect()
            })
            .collect();
        clauses.extend(images);
    }

    Cnf::new(num_vars, clauses)
}

fn random_substitution(rng: &mut fastrand::Rng, num_vars: Variable) -> Substitution {
    let v1 = rng.u32(1..=num_vars);
    if rng.bool() {
        Substitution::Negate(v1)
    } else {
        let v2 = rng.u32(1..=num_vars);
        if v1 == v2 {
            Substitution::Negate(v1)
        } else {
            Substitution::Swap(v1, v2)
        }
    }
}

fn random_formulas(seed: u64, count: usize) -> Vec<Cnf> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|i| {
            let num_vars = rng.u32(2..=6);
            let close_under = (i % 2 == 0).then(|| random_substitution(&mut rng, num_vars));
            random_cnf(&mut rng, num_vars, close_under)
        })
        .collect()
}

/// Negation symmetries found by applying every substitution to the formula.
fn brute_force_negations(cnf: &Cnf) -> BTreeSet<(Variable, Variable)> {
    let index = OccurrenceIndex::new(cnf);
    cnf.variables()
        .filter(|&v| index.count(Literal::positive(v)) != 0)
        .filter(|&v| preserves(cnf, Substitution::Negate(v)))
        .map(|v| (v, v))
        .collect()
}

/// Pair symmetries found by applying every substitution to the formula.
fn brute_force_pairs(cnf: &Cnf) -> BTreeSet<(Variable, Variable)> {
    let index = OccurrenceIndex::new(cnf);
    let mut pairs = BTreeSet::new();
    for v1 in cnf.variables() {
        for v2 in v1 + 1..=cnf.num_vars {
            if index.count(Literal::positive(v1)) != 0
                && preserves(cnf, Substitution::Swap(v1, v2))
            {
                pairs.insert((v1, v2));
            }
        }
    }
    pairs
}

#[test]
fn test_negated_variable_is_reported() {
    let cnf = parse_str("p cnf 2 2\n1 2 0\n-1 2 0\n").expect("valid input");
    let report = detect(&cnf, DetectorConfig::default());
    assert_eq!(report.symmetries, vec![Symmetry::Negation(1)]);
    assert_eq!(report.symmetries[0].to_string(), "-1 1 0");
}

#[test]
fn test_positive_clause_has_only_pairs() {
    let cnf = parse_str("p cnf 3 1\n1 2 3 0\n").expect("valid input");

    let single = detect(&cnf, DetectorConfig::default());
    assert!(single.symmetries.is_empty());
    assert_eq!(single.stats.candidates, 0);

    let pair = detect(&cnf, DetectorConfig::with_mode(Mode::Pair));
    assert_eq!(
        pair.symmetries,
        vec![
            Symmetry::Pair(1, 2),
            Symmetry::Pair(1, 3),
            Symmetry::Pair(2, 3)
        ]
    );
    assert_eq!(pair.stats.candidates, 3);
}

#[test]
fn test_empty_formula_has_no_symmetries() {
    let cnf = parse_str("p cnf 5 0\n").expect("valid input");
    for mode in [Mode::Single, Mode::Pair] {
        let report = detect(&cnf, DetectorConfig::with_mode(mode));
        assert!(report.symmetries.is_empty());
    }
}

#[test]
fn test_literal_out_of_range_is_rejected() {
    assert!(parse_str("p cnf 2 1\n1 3 0\n").is_err());
}

#[test]
fn test_empty_clause_does_not_disturb_search() {
    let cnf = parse_str("p cnf 2 3\n1 2 0\n0\n-1 2 0\n").expect("valid input");
    assert_eq!(cnf.empty_clause, Some(1));
    let report = detect(&cnf, DetectorConfig::default());
    assert_eq!(report.symmetries, vec![Symmetry::Negation(1)]);
}

#[test]
fn test_detector_matches_brute_force() {
    for cnf in random_formulas(0x5eed, 300) {
        let single = detect(&cnf, DetectorConfig::default());
        assert_eq!(
            normalised(&single.symmetries),
            brute_force_negations(&cnf),
            "negations of {cnf}"
        );

        let pair = detect(&cnf, DetectorConfig::with_mode(Mode::Pair));
        assert_eq!(
            normalised(&pair.symmetries),
            brute_force_pairs(&cnf),
            "pairs of {cnf}"
        );
    }
}

#[test]
fn test_heuristics_do_not_change_results() {
    for cnf in random_formulas(42, 150) {
        for mode in [Mode::Single, Mode::Pair] {
            let expected = normalised(&detect(&cnf, DetectorConfig::with_mode(mode)).symmetries);
            for config in heuristic_configs(DetectorConfig::with_mode(mode)) {
                let found = normalised(&detect(&cnf, config).symmetries);
                assert_eq!(found, expected, "{config:?} on {cnf}");
            }
        }
    }
}

#[test]
fn test_repeated_runs_agree() {
    for cnf in random_formulas(7, 50) {
        for config in heuristic_configs(DetectorConfig::with_mode(Mode::Pair)) {
            let mut detector = SymmetryDetector::new(cnf.clone(), config);
            let first = detector.run();
            let second = detector.run();
            assert_eq!(first.symmetries, second.symmetries);
            assert_eq!(first, detect(&cnf, config));
        }
    }
}

#[test]
fn test_groups_hold_pairwise() {
    let base = DetectorConfig {
        groups: true,
        ..DetectorConfig::with_mode(Mode::Pair)
    };
    for cnf in random_formulas(99, 150) {
        for config in heuristic_configs(base) {
            let report = detect(&cnf, config);
            for symmetry in &report.symmetries {
                let Symmetry::Group(vars) = symmetry else {
                    panic!("expected only groups, got {symmetry}");
                };
                assert!(vars.len() >= 2);
                assert!(is_symmetry(&cnf, symmetry), "{symmetry} on {cnf}");
            }
        }
    }
}

#[test]
fn test_groups_cover_every_chained_variable_once() {
    let config = DetectorConfig {
        groups: true,
        ..DetectorConfig::with_mode(Mode::Pair)
    };
    // Five variables in one clause: all are mutually exchangeable.
    let cnf = Cnf::new(5, vec![vec![1, 2, 3, 4, 5], vec![-1, -2, -3, -4, -5]]);
    let report = detect(&cnf, config);
    assert_eq!(report.symmetries, vec![Symmetry::Group(vec![1, 2, 3, 4, 5])]);
}

#[test]
fn test_pair_limit_reports_a_subset() {
    let cnf = Cnf::new(6, vec![vec![1, 2, 3, 4, 5, 6]]);
    let full = detect(&cnf, DetectorConfig::with_mode(Mode::Pair));
    assert!(!full.stats.limit_reached);
    assert_eq!(full.symmetries.len(), 15);

    let capped = detect(
        &cnf,
        DetectorConfig {
            pair_limit: 4,
            ..DetectorConfig::with_mode(Mode::Pair)
        },
    );
    assert!(capped.stats.limit_reached);
    assert_eq!(capped.stats.pairs_checked, 4);
    assert_eq!(capped.symmetries, full.symmetries[..4].to_vec());
}

#[test]
fn test_sorting_reduces_pair_checks() {
    // Two blocks of interchangeable variables with different signatures.
    let cnf = Cnf::new(
        6,
        vec![vec![1, 3, 5], vec![2, 4, 6], vec![-2], vec![-4], vec![-6]],
    );
    let plain = detect(&cnf, DetectorConfig::with_mode(Mode::Pair));
    let sorted = detect(
        &cnf,
        DetectorConfig {
            variable_sorting: true,
            ..DetectorConfig::with_mode(Mode::Pair)
        },
    );
    assert_eq!(normalised(&plain.symmetries), normalised(&sorted.symmetries));
    assert!(sorted.stats.pairs_checked < plain.stats.pairs_checked);
}
