// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use crate::graph::LockedGraph;

/// A complete ranking of all the candidates, most preferred first.
///
/// Each element is the zero-based index of a registered candidate. A valid
/// ballot contains every index exactly once.
pub type Ballot = Vec<usize>;

/// A registered candidate. Its index is its position in the registration order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub name: String,
}

// ******** Output data structures *********

/// Pairwise preference counts.
///
/// `get(a, b)` is the number of ballots that rank candidate `a` strictly above
/// candidate `b`. The diagonal is always zero.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PreferenceMatrix {
    counts: Vec<Vec<u64>>,
}

impl PreferenceMatrix {
    pub(crate) fn new(num_candidates: usize) -> PreferenceMatrix {
        PreferenceMatrix {
            counts: vec![vec![0; num_candidates]; num_candidates],
        }
    }

    pub(crate) fn increment(&mut self, preferred: usize, over: usize) {
        self.counts[preferred][over] += 1;
    }

    pub fn num_candidates(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, preferred: usize, over: usize) -> u64 {
        self.counts[preferred][over]
    }

    /// The rows of the matrix: rows are preferred over columns.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.counts
    }
}

/// A strict majority preference of `winner` over `loser`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Pair {
    pub winner: usize,
    pub loser: usize,
    /// The margin of victory. Always strictly positive.
    pub strength: u64,
}

/// The outcome of considering one pair during locking.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct LockStep {
    pub pair: Pair,
    /// false if the edge would have closed a cycle and was skipped.
    pub locked: bool,
}

/// All the artifacts of one election run, and its verdict.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub preferences: PreferenceMatrix,
    /// The pairs, from the strongest to the weakest margin.
    pub pairs: Vec<Pair>,
    /// One step per sorted pair, in processing order.
    pub lock_steps: Vec<LockStep>,
    pub locked: LockedGraph,
    /// Candidates without any incoming locked edge, in index order.
    pub sources: Vec<usize>,
    /// The unique source, if there is one. `None` means that there is no unique winner.
    pub winner: Option<usize>,
}

/// Why a ballot is not a permutation of the candidate indices.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotDefect {
    WrongLength { expected: usize, found: usize },
    OutOfRange(usize),
    Duplicate(usize),
    UnknownCandidate(String),
}

impl Display for BallotDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotDefect::WrongLength { expected, found } => {
                write!(f, "expected {} ranks, found {}", expected, found)
            }
            BallotDefect::OutOfRange(cid) => write!(f, "candidate index {} is out of range", cid),
            BallotDefect::Duplicate(cid) => write!(f, "candidate index {} is ranked twice", cid),
            BallotDefect::UnknownCandidate(name) => write!(f, "unknown candidate {:?}", name),
        }
    }
}

/// Errors that prevent the algorithm from completing successfully.
///
/// Not having a unique winner is not an error: it is reported by
/// `ElectionResult::winner` being `None`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// Fewer than two candidates.
    InvalidCandidateSet { count: usize },
    /// A ballot is not a complete ranking. `position` is the index of the ballot
    /// in the submission, when known.
    InvalidBallot {
        position: Option<usize>,
        defect: BallotDefect,
    },
    EmptyBallotSet,
    /// The locked graph has no source, which cannot happen with an acyclic graph.
    InconsistentGraph,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::InvalidCandidateSet { count } => write!(
                f,
                "at least two candidates are required, {} were provided",
                count
            ),
            VotingErrors::InvalidBallot {
                position: Some(pos),
                defect,
            } => write!(f, "invalid ballot #{}: {}", pos + 1, defect),
            VotingErrors::InvalidBallot {
                position: None,
                defect,
            } => write!(f, "invalid ballot: {}", defect),
            VotingErrors::EmptyBallotSet => write!(f, "no ballots were provided"),
            VotingErrors::InconsistentGraph => {
                write!(f, "internal error: the locked graph has no source")
            }
        }
    }
}

// ********* Configuration **********

/// How pairs of equal strength are ordered relative to each other.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Equal pairs keep their construction order: increasing winner/loser
    /// indices, smallest index first.
    ConstructionOrder,
    /// Equal pairs are ordered by a cryptographic hash of the seed and the pair.
    /// The order is hard to guess in advance but fixed for a given seed.
    Random(u32),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionRules {
    pub tiebreak_mode: TieBreakMode,
}

impl ElectionRules {
    pub const DEFAULT_RULES: ElectionRules = ElectionRules {
        tiebreak_mode: TieBreakMode::ConstructionOrder,
    };
}

impl Default for ElectionRules {
    fn default() -> Self {
        ElectionRules::DEFAULT_RULES
    }
}
