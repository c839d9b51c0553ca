pub mod candidate;
pub mod election;
pub mod id;
pub mod mongodb;

use crate::error::{Error, Result};

/// A record that is identified to users by a display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Reject any named record whose name is empty.
///
/// Names are checked exactly as decoded, so whitespace-only names are allowed.
pub fn validate_name<T: Named>(entity: &T) -> Result<()> {
    if entity.name().is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{candidate::NewCandidate, election::NewElection};

    #[test]
    fn empty_names_are_rejected() {
        let election = NewElection {
            name: String::new(),
        };
        assert!(matches!(validate_name(&election), Err(Error::EmptyName)));

        let candidate = NewCandidate {
            name: String::new(),
        };
        assert!(matches!(validate_name(&candidate), Err(Error::EmptyName)));
    }

    #[test]
    fn non_empty_names_are_accepted() {
        assert!(validate_name(&NewElection::example()).is_ok());
        assert!(validate_name(&NewCandidate::example1()).is_ok());
        let blank = NewElection {
            name: " ".to_string(),
        };
        assert!(validate_name(&blank).is_ok());
    }
}
