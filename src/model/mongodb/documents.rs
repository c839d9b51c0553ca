use serde::{Deserialize, Serialize};

use crate::model::{
    candidate::{Candidate, CandidateId},
    election::{Election, ElectionId},
};

/// An election as stored in MongoDB, keyed by its numeric ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDocument {
    #[serde(rename = "_id")]
    pub id: ElectionId,
    pub name: String,
}

impl From<Election> for ElectionDocument {
    fn from(election: Election) -> Self {
        Self {
            id: election.id,
            name: election.name,
        }
    }
}

impl From<ElectionDocument> for Election {
    fn from(doc: ElectionDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
        }
    }
}

/// A candidate as stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    #[serde(rename = "_id")]
    pub id: CandidateId,
    pub name: String,
    pub election_id: ElectionId,
}

impl From<Candidate> for CandidateDocument {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            election_id: candidate.election_id,
        }
    }
}

impl From<CandidateDocument> for Candidate {
    fn from(doc: CandidateDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            election_id: doc.election_id,
        }
    }
}
