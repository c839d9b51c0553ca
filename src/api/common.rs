use rocket::{
    data::{Data, Limits},
    serde::json::serde_json,
};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::{validate_name, Named};

/// Read a request body as UTF-8 text, capped at the configured `json` limit.
///
/// Handlers take the raw [`Data`] and call this themselves, so nothing about
/// the body is looked at until they are ready for it.
pub async fn read_body(data: Data<'_>, limits: &Limits) -> Result<String> {
    let limit = limits.get("json").unwrap_or(Limits::JSON);
    let body = data.open(limit).into_string().await?;
    if !body.is_complete() {
        return Err(Error::BodyTooLarge(limit));
    }
    Ok(body.into_inner())
}

/// Decode a request body into a named record and check its name.
pub fn decode_named<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned + Named,
{
    let entity: T = serde_json::from_str(body)?;
    validate_name(&entity)?;
    Ok(entity)
}

/// Read, decode and validate a request body in one step.
pub async fn read_named<T>(data: Data<'_>, limits: &Limits) -> Result<T>
where
    T: DeserializeOwned + Named,
{
    decode_named(&read_body(data, limits).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::model::{candidate::NewCandidate, election::NewElection};

    #[test]
    fn decodes_and_validates() {
        let election: NewElection = decode_named(r#"{"name": "Test Election"}"#).unwrap();
        assert_eq!(election, NewElection::example());

        let result = decode_named::<NewElection>(r#"{"name": ""}"#);
        assert!(matches!(result, Err(Error::EmptyName)));

        let result = decode_named::<NewElection>("{}");
        assert!(matches!(result, Err(Error::EmptyName)));
    }

    #[test]
    fn ignores_client_supplied_scoping() {
        let candidate: NewCandidate =
            decode_named(r#"{"id": 99, "name": "Alice", "election_id": 42}"#).unwrap();
        assert_eq!(candidate, NewCandidate::example1());
    }

    #[test]
    fn rejects_malformed_bodies() {
        for body in ["", "not json", r#"{"name": 5}"#, "42"] {
            let result = decode_named::<NewElection>(body);
            assert!(
                matches!(result, Err(Error::MalformedBody(_))),
                "{body:?} should be malformed"
            );
        }
    }
}
