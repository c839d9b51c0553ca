use serde::{Deserialize, Serialize};

use super::{election::ElectionId, Named};

/// Candidates are numbered from 1 across all elections.
pub type CandidateId = u32;

/// A candidate as submitted by a client.
///
/// The owning election always comes from the request path, so any
/// `election_id` in the body is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCandidate {
    #[serde(default)]
    pub name: String,
}

impl Named for NewCandidate {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A stored candidate, with its unique ID and owning election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub election_id: ElectionId,
}

impl Candidate {
    pub fn new(id: CandidateId, election_id: ElectionId, candidate: NewCandidate) -> Self {
        Self {
            id,
            name: candidate.name,
            election_id,
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl NewCandidate {
        pub fn example1() -> Self {
            Self {
                name: "Alice".to_string(),
            }
        }

        pub fn example2() -> Self {
            Self {
                name: "Bob".to_string(),
            }
        }
    }
}
