use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use rocket::request::FromParam;

use crate::error::Error;

/// A numeric identifier taken from a request path.
///
/// Route handlers accept this as `Result<Id>` so that a malformed segment
/// becomes a `400` from the handler rather than a forward by the router.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(u32);

impl Deref for Id {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Id {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self).map_err(|_| Error::InvalidId)
    }
}

impl<'a> FromParam<'a> for Id {
    type Error = Error;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        param.parse::<Id>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_non_negative_integers() {
        assert_eq!(*Id::from_param("0").unwrap(), 0);
        assert_eq!(*Id::from_param("1234").unwrap(), 1234);
    }

    #[test]
    fn rejects_everything_else() {
        for bad in ["", "abc", "-1", "1.5", "12a", "99999999999"] {
            assert!(
                matches!(Id::from_param(bad), Err(Error::InvalidId)),
                "{bad:?} should be rejected"
            );
        }
    }
}
