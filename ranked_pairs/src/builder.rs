pub use crate::config::*;

/// A builder for registering candidates and adding ballots by candidate name.
///
/// Candidates get their index from their registration order. Every ballot is
/// checked when it is added, so that an invalid ballot is reported with its
/// position in the submission.
///
/// ```
/// pub use ranked_pairs::builder::Builder;
/// pub use ranked_pairs::ElectionRules;
/// # use ranked_pairs::VotingErrors;
///
/// let mut builder = Builder::new(&ElectionRules::DEFAULT_RULES)?
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&["Anna".to_string(), "Bob".to_string()])?;
/// builder.add_ballot(&["Bob".to_string(), "Anna".to_string()])?;
/// builder.add_ballot(&["Anna".to_string(), "Bob".to_string()])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.winner, Some(0));
///
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: ElectionRules,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new(rules: &ElectionRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
            _ballots: Vec::new(),
        })
    }

    /// Registers the candidates, in order. Any ballot added before is discarded.
    ///
    /// Duplicate names are accepted and occupy distinct slots, but ballots
    /// expressed by name can only refer to the first of them.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        if cands.len() < 2 {
            return Err(VotingErrors::InvalidCandidateSet { count: cands.len() });
        }
        Ok(Builder {
            _rules: self._rules,
            _candidates: cands
                .iter()
                .map(|name| Candidate { name: name.clone() })
                .collect(),
            _ballots: Vec::new(),
        })
    }

    pub fn candidate_names(&self) -> Vec<String> {
        self._candidates.iter().map(|c| c.name.clone()).collect()
    }

    pub fn candidate_index(&self, name: &str) -> Option<usize> {
        self._candidates.iter().position(|c| c.name == name)
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    /// Adds a ballot, with the candidates named from the most preferred to the
    /// least preferred.
    pub fn add_ballot(&mut self, names: &[String]) -> Result<(), VotingErrors> {
        let mut ballot: Ballot = Vec::with_capacity(names.len());
        for name in names {
            match self.candidate_index(name) {
                Some(cid) => ballot.push(cid),
                None => {
                    return Err(VotingErrors::InvalidBallot {
                        position: Some(self._ballots.len()),
                        defect: BallotDefect::UnknownCandidate(name.clone()),
                    });
                }
            }
        }
        self.add_ballot_indices(&ballot)
    }

    /// Adds a ballot expressed with candidate indices.
    pub fn add_ballot_indices(&mut self, ballot: &[usize]) -> Result<(), VotingErrors> {
        crate::validate(self._candidates.len(), ballot).map_err(|e| match e {
            VotingErrors::InvalidBallot { defect, .. } => VotingErrors::InvalidBallot {
                position: Some(self._ballots.len()),
                defect,
            },
            other => other,
        })?;
        self._ballots.push(ballot.to_vec());
        Ok(())
    }

    pub fn run(&self) -> Result<crate::ElectionResult, VotingErrors> {
        crate::run_election(self._candidates.len(), &self._ballots, &self._rules)
    }
}
