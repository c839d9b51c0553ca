use serde::{Deserialize, Serialize};

use super::Named;

/// Elections are numbered from 1 in creation order.
pub type ElectionId = u32;

/// An election as submitted by a client, before it has been assigned an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewElection {
    /// Missing names decode as empty so they fail validation rather than parsing.
    #[serde(default)]
    pub name: String,
}

impl Named for NewElection {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A stored election, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    pub name: String,
}

impl Election {
    /// Combine a submitted election with the ID the store assigned it.
    pub fn new(id: ElectionId, election: NewElection) -> Self {
        Self {
            id,
            name: election.name,
        }
    }
}
