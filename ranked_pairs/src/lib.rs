/*!

An implementation of the Tideman voting method, also called ranked pairs.

Each voter ranks all the candidates. The ballots are turned into a matrix of
pairwise preferences, from which all the head-to-head victories are extracted
and sorted from the largest margin to the smallest one. Victories are then
"locked" one after the other into a graph, unless locking one would create a
cycle. The winner is the candidate that nobody beats in the locked graph.

The main entry points are [`compute_election`] for ballots already expressed
as candidate indices, and the [`builder::Builder`] for ballots expressed with
candidate names.

```
use ranked_pairs::compute_election;

// Alice = 0, Bob = 1, Charlie = 2
let ballots = vec![vec![0, 1, 2], vec![1, 2, 0], vec![0, 2, 1]];
let result = compute_election(3, &ballots)?;
assert_eq!(result.winner, Some(0));
# Ok::<(), ranked_pairs::VotingErrors>(())
```
*/

pub mod builder;
mod config;
mod graph;
pub mod manual;

use log::{debug, info};

use std::cmp::Reverse;

pub use crate::config::*;
pub use crate::graph::LockedGraph;

/// Checks that a ballot ranks each of the `num_candidates` candidates exactly once.
pub fn validate(num_candidates: usize, ballot: &[usize]) -> Result<(), VotingErrors> {
    check_ballot(num_candidates, ballot).map_err(|defect| VotingErrors::InvalidBallot {
        position: None,
        defect,
    })
}

/// Runs the ranked pairs method with the default rules.
///
/// Equal-strength pairs are processed in construction order.
pub fn compute_election(
    candidate_count: usize,
    ballots: &[Ballot],
) -> Result<ElectionResult, VotingErrors> {
    run_election(candidate_count, ballots, &ElectionRules::DEFAULT_RULES)
}

/// Runs the ranked pairs method with the given rules.
///
/// Arguments:
/// * `candidate_count` the number of registered candidates, at least 2
/// * `ballots` the complete rankings, as candidate indices. If any of them is
/// not a permutation of `0..candidate_count`, the whole submission is rejected.
/// * `rules` the rules that govern this election
pub fn run_election(
    candidate_count: usize,
    ballots: &[Ballot],
    rules: &ElectionRules,
) -> Result<ElectionResult, VotingErrors> {
    info!(
        "Processing {:?} ballots, {:?} candidates, rules: {:?}",
        ballots.len(),
        candidate_count,
        rules
    );

    if candidate_count < 2 {
        return Err(VotingErrors::InvalidCandidateSet {
            count: candidate_count,
        });
    }
    if ballots.is_empty() {
        return Err(VotingErrors::EmptyBallotSet);
    }
    for (idx, ballot) in ballots.iter().enumerate() {
        check_ballot(candidate_count, ballot).map_err(|defect| VotingErrors::InvalidBallot {
            position: Some(idx),
            defect,
        })?;
    }

    let preferences = record_preferences(candidate_count, ballots);
    debug!("run_election: preferences: {:?}", preferences);

    let mut pairs = build_pairs(&preferences);
    sort_pairs(&mut pairs, rules.tiebreak_mode);
    debug!("run_election: sorted pairs: {:?}", pairs);

    let (locked, lock_steps) = lock_pairs(candidate_count, &pairs);
    debug!("run_election: locked edges: {:?}", locked.edges());

    let sources = locked.sources();
    let winner = match sources.as_slice() {
        [] => return Err(VotingErrors::InconsistentGraph),
        [cid] => Some(*cid),
        _ => None,
    };
    info!(
        "run_election: {} pairs, {} locked, sources: {:?}, winner: {:?}",
        pairs.len(),
        lock_steps.iter().filter(|s| s.locked).count(),
        sources,
        winner
    );

    Ok(ElectionResult {
        preferences,
        pairs,
        lock_steps,
        locked,
        sources,
        winner,
    })
}

// A ballot of the right length with all indices in range and no duplicate is a permutation.
fn check_ballot(num_candidates: usize, ballot: &[usize]) -> Result<(), BallotDefect> {
    if ballot.len() != num_candidates {
        return Err(BallotDefect::WrongLength {
            expected: num_candidates,
            found: ballot.len(),
        });
    }
    let mut seen: Vec<bool> = vec![false; num_candidates];
    for &cid in ballot.iter() {
        if cid >= num_candidates {
            return Err(BallotDefect::OutOfRange(cid));
        }
        if seen[cid] {
            return Err(BallotDefect::Duplicate(cid));
        }
        seen[cid] = true;
    }
    Ok(())
}

/// Every candidate is preferred over all the candidates ranked after it, not
/// only over the next one.
fn record_preferences(num_candidates: usize, ballots: &[Ballot]) -> PreferenceMatrix {
    let mut preferences = PreferenceMatrix::new(num_candidates);
    for ballot in ballots.iter() {
        for (rank, &preferred) in ballot.iter().enumerate() {
            for &less_preferred in ballot[rank + 1..].iter() {
                preferences.increment(preferred, less_preferred);
            }
        }
    }
    preferences
}

// Pairs are produced by increasing (i, j) with i < j. Ties produce no pair.
fn build_pairs(preferences: &PreferenceMatrix) -> Vec<Pair> {
    let n = preferences.num_candidates();
    let mut pairs: Vec<Pair> = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let prefers_i = preferences.get(i, j);
            let prefers_j = preferences.get(j, i);
            if prefers_i > prefers_j {
                pairs.push(Pair {
                    winner: i,
                    loser: j,
                    strength: prefers_i - prefers_j,
                });
            } else if prefers_j > prefers_i {
                pairs.push(Pair {
                    winner: j,
                    loser: i,
                    strength: prefers_j - prefers_i,
                });
            } else {
                debug!("build_pairs: tie between {} and {}", i, j);
            }
        }
    }
    pairs
}

// Both sorts are stable.
fn sort_pairs(pairs: &mut [Pair], tiebreak: TieBreakMode) {
    match tiebreak {
        TieBreakMode::ConstructionOrder => {
            pairs.sort_by_key(|p| Reverse(p.strength));
        }
        TieBreakMode::Random(seed) => {
            pairs.sort_by_cached_key(|p| (Reverse(p.strength), pair_digest(p, seed)));
        }
    }
}

/// A hash of the pair that is hard to guess in advance. This uses a
/// cryptographic algorithm that is resilient to collisions.
fn pair_digest(pair: &Pair, seed: u32) -> String {
    sha256::digest(format!("{:08}{:08}{:08}", seed, pair.winner, pair.loser))
}

/// Greedy, single pass: a skipped pair is never reconsidered.
fn lock_pairs(num_candidates: usize, pairs: &[Pair]) -> (LockedGraph, Vec<LockStep>) {
    let mut locked = LockedGraph::new(num_candidates);
    let mut steps: Vec<LockStep> = Vec::with_capacity(pairs.len());
    for pair in pairs.iter() {
        // A path from the loser back to the winner would be closed into a cycle.
        let creates_cycle = locked.has_path(pair.loser, pair.winner);
        if creates_cycle {
            debug!("lock_pairs: skipping {:?}, it would create a cycle", pair);
        } else {
            locked.lock(pair.winner, pair.loser);
        }
        steps.push(LockStep {
            pair: *pair,
            locked: !creates_cycle,
        });
    }
    (locked, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn repeat(ballot: &[usize], times: usize) -> Vec<Ballot> {
        (0..times).map(|_| ballot.to_vec()).collect()
    }

    #[test]
    fn validate_accepts_permutation() {
        assert_eq!(validate(3, &[2, 0, 1]), Ok(()));
    }

    #[test]
    fn validate_rejects_wrong_length() {
        assert_eq!(
            validate(3, &[0, 1]),
            Err(VotingErrors::InvalidBallot {
                position: None,
                defect: BallotDefect::WrongLength {
                    expected: 3,
                    found: 2
                }
            })
        );
        assert!(validate(2, &[0, 1, 1]).is_err());
    }

    #[test]
    fn validate_rejects_duplicate() {
        assert_eq!(
            validate(3, &[0, 1, 1]),
            Err(VotingErrors::InvalidBallot {
                position: None,
                defect: BallotDefect::Duplicate(1)
            })
        );
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            validate(3, &[0, 1, 3]),
            Err(VotingErrors::InvalidBallot {
                position: None,
                defect: BallotDefect::OutOfRange(3)
            })
        );
    }

    #[test]
    fn rejects_small_candidate_set() {
        init();
        assert_eq!(
            compute_election(1, &[vec![0]]),
            Err(VotingErrors::InvalidCandidateSet { count: 1 })
        );
        assert_eq!(
            compute_election(0, &[]),
            Err(VotingErrors::InvalidCandidateSet { count: 0 })
        );
    }

    #[test]
    fn rejects_empty_ballot_set() {
        init();
        assert_eq!(compute_election(3, &[]), Err(VotingErrors::EmptyBallotSet));
    }

    #[test]
    fn one_invalid_ballot_rejects_submission() {
        init();
        let ballots = vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 2, 0]];
        assert_eq!(
            compute_election(3, &ballots),
            Err(VotingErrors::InvalidBallot {
                position: Some(2),
                defect: BallotDefect::Duplicate(2)
            })
        );
    }

    #[test]
    fn scenario_clear_winner() {
        init();
        let mut ballots = repeat(&[0, 1, 2], 3);
        ballots.extend(repeat(&[1, 2, 0], 2));
        let res = compute_election(3, &ballots).unwrap();

        assert_eq!(
            res.preferences.rows(),
            &[vec![0, 3, 3], vec![2, 0, 5], vec![2, 0, 0]]
        );
        assert_eq!(
            res.pairs,
            vec![
                Pair {
                    winner: 1,
                    loser: 2,
                    strength: 5
                },
                Pair {
                    winner: 0,
                    loser: 1,
                    strength: 1
                },
                Pair {
                    winner: 0,
                    loser: 2,
                    strength: 1
                },
            ]
        );
        assert!(res.lock_steps.iter().all(|s| s.locked));
        assert_eq!(res.locked.edges(), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(res.sources, vec![0]);
        assert_eq!(res.winner, Some(0));
    }

    #[test]
    fn scenario_condorcet_cycle() {
        init();
        let ballots = vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]];
        let res = compute_election(3, &ballots).unwrap();

        assert!(res.pairs.iter().all(|p| p.strength == 1));
        // Construction order: (0, 1), (0, 2), (1, 2).
        assert_eq!(
            res.pairs
                .iter()
                .map(|p| (p.winner, p.loser))
                .collect::<Vec<_>>(),
            vec![(0, 1), (2, 0), (1, 2)]
        );
        assert_eq!(
            res.lock_steps.iter().map(|s| s.locked).collect::<Vec<_>>(),
            vec![true, true, false]
        );
        assert_eq!(res.locked.edges(), vec![(0, 1), (2, 0)]);
        assert_eq!(res.winner, Some(2));
    }

    #[test]
    fn scenario_even_split_has_no_winner() {
        init();
        let ballots = vec![vec![0, 1], vec![1, 0]];
        let res = compute_election(2, &ballots).unwrap();
        assert_eq!(res.preferences.get(0, 1), res.preferences.get(1, 0));
        assert!(res.pairs.is_empty());
        assert!(res.lock_steps.is_empty());
        assert!(res.locked.edges().is_empty());
        assert_eq!(res.sources, vec![0, 1]);
        assert_eq!(res.winner, None);
    }

    #[test]
    fn disconnected_graph_has_no_winner() {
        init();
        // 0 and 1 beat both 2 and 3, 0/1 and 2/3 are tied.
        let ballots = vec![vec![0, 1, 2, 3], vec![1, 0, 3, 2]];
        let res = compute_election(4, &ballots).unwrap();
        assert_eq!(res.sources, vec![0, 1]);
        assert_eq!(res.winner, None);
    }

    #[test]
    fn lower_ranks_count_as_preferences() {
        init();
        let res = compute_election(4, &[vec![3, 2, 1, 0]]).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i > j { 1 } else { 0 };
                assert_eq!(res.preferences.get(i, j), expected);
            }
        }
        assert_eq!(res.pairs.len(), 6);
        assert_eq!(res.winner, Some(3));
    }

    #[test]
    fn skipped_pair_is_never_retried() {
        init();
        // 0 > 1 (3), 1 > 2 (3), 2 > 0 (1), 3 trails everyone.
        let mut ballots = repeat(&[0, 1, 2, 3], 3);
        ballots.extend(repeat(&[1, 2, 0, 3], 2));
        ballots.extend(repeat(&[2, 0, 1, 3], 2));
        let res = compute_election(4, &ballots).unwrap();
        let skipped: Vec<Pair> = res
            .lock_steps
            .iter()
            .filter(|s| !s.locked)
            .map(|s| s.pair)
            .collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!((skipped[0].winner, skipped[0].loser), (2, 0));
        assert!(!res.locked.is_locked(2, 0));
        assert_eq!(res.winner, Some(0));
    }

    #[test]
    fn random_tiebreak_is_deterministic() {
        init();
        let ballots = vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]];
        let rules = ElectionRules {
            tiebreak_mode: TieBreakMode::Random(42),
        };
        let res1 = run_election(3, &ballots, &rules).unwrap();
        let res2 = run_election(3, &ballots, &rules).unwrap();
        assert_eq!(res1, res2);
        assert!(res1.winner.is_some());
        // Strengths are all equal, so only the order may change.
        let mut sorted = res1.pairs.clone();
        sorted.sort_by_key(|p| (p.winner, p.loser));
        let mut reference = compute_election(3, &ballots).unwrap().pairs;
        reference.sort_by_key(|p| (p.winner, p.loser));
        assert_eq!(sorted, reference);
    }

    #[test]
    fn random_tiebreak_keeps_strength_order() {
        init();
        let mut ballots = repeat(&[0, 1, 2], 3);
        ballots.extend(repeat(&[1, 2, 0], 2));
        let rules = ElectionRules {
            tiebreak_mode: TieBreakMode::Random(7),
        };
        let res = run_election(3, &ballots, &rules).unwrap();
        assert_eq!(res.pairs[0].strength, 5);
        assert_eq!(res.winner, Some(0));
    }

    #[test]
    fn inputs_are_not_mutated() {
        init();
        let ballots = vec![vec![0, 1, 2], vec![2, 1, 0], vec![1, 0, 2]];
        let copy = ballots.clone();
        let res1 = compute_election(3, &ballots).unwrap();
        let res2 = compute_election(3, &ballots).unwrap();
        assert_eq!(ballots, copy);
        assert_eq!(res1, res2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A number of candidates and a non-empty set of complete ballots.
    fn election_strategy() -> impl Strategy<Value = (usize, Vec<Ballot>)> {
        (2usize..7).prop_flat_map(|n| {
            let ballot = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
            (Just(n), prop::collection::vec(ballot, 1..25))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn deterministic((n, ballots) in election_strategy()) {
            let a = compute_election(n, &ballots).unwrap();
            let b = compute_election(n, &ballots).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn matrix_complement((n, ballots) in election_strategy()) {
            let res = compute_election(n, &ballots).unwrap();
            for i in 0..n {
                prop_assert_eq!(res.preferences.get(i, i), 0);
                for j in 0..n {
                    if i != j {
                        prop_assert_eq!(
                            res.preferences.get(i, j) + res.preferences.get(j, i),
                            ballots.len() as u64
                        );
                    }
                }
            }
        }

        #[test]
        fn pairs_sorted_and_positive((n, ballots) in election_strategy()) {
            let res = compute_election(n, &ballots).unwrap();
            prop_assert!(res.pairs.iter().all(|p| p.strength > 0));
            prop_assert!(res.pairs.windows(2).all(|w| w[0].strength >= w[1].strength));
            prop_assert_eq!(res.lock_steps.len(), res.pairs.len());
        }

        #[test]
        fn acyclic_after_every_lock((n, ballots) in election_strategy()) {
            let res = compute_election(n, &ballots).unwrap();
            let mut replay = LockedGraph::new(n);
            for step in res.lock_steps.iter() {
                if step.locked {
                    replay.lock(step.pair.winner, step.pair.loser);
                    prop_assert!(replay.is_acyclic());
                } else {
                    // A skipped pair would have closed a cycle.
                    let mut with_edge = replay.clone();
                    with_edge.lock(step.pair.winner, step.pair.loser);
                    prop_assert!(!with_edge.is_acyclic());
                }
            }
            prop_assert_eq!(replay, res.locked);
        }

        #[test]
        fn source_exists((n, ballots) in election_strategy()) {
            let res = compute_election(n, &ballots).unwrap();
            prop_assert!(!res.sources.is_empty());
            match res.winner {
                Some(w) => prop_assert_eq!(res.sources, vec![w]),
                None => prop_assert!(res.sources.len() > 1),
            }
        }

        #[test]
        fn ballots_left_untouched((n, ballots) in election_strategy()) {
            let copy = ballots.clone();
            let first = compute_election(n, &ballots).unwrap();
            prop_assert_eq!(&ballots, &copy);
            let second = compute_election(n, &ballots).unwrap();
            prop_assert_eq!(&ballots, &copy);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn random_tiebreak_deterministic((n, ballots) in election_strategy(), seed in any::<u32>()) {
            let rules = ElectionRules { tiebreak_mode: TieBreakMode::Random(seed) };
            let a = run_election(n, &ballots, &rules).unwrap();
            let b = run_election(n, &ballots, &rules).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
