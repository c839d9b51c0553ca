mod collection;
mod counter;
mod documents;
mod errors;

pub use collection::{ensure_indexes_exist, Coll, MongoCollection};
pub use counter::{ensure_counters_exist, Counter, CANDIDATE_ID_COUNTER_ID, ELECTION_ID_COUNTER_ID};
pub use documents::{CandidateDocument, ElectionDocument};
pub use errors::is_duplicate_key_error;
