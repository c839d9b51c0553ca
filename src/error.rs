use std::io;

use rocket::{
    data::ByteUnit, http::Status, response::Responder, serde::json::serde_json, Request,
};
use thiserror::Error;

use crate::logging::RequestId;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a request handler can fail with.
///
/// Each variant maps to exactly one status and one plain-text body. Store
/// failures never reach the client beyond a generic message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid ID")]
    InvalidId,
    #[error("Empty name forbidden.")]
    EmptyName,
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Unreadable body: {0}")]
    UnreadableBody(#[from] io::Error),
    #[error("Body exceeds the {0} limit")]
    BodyTooLarge(ByteUnit),
    #[error("Name taken: {0}")]
    NameTaken(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(StoreError),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidId
            | Self::EmptyName
            | Self::MalformedBody(_)
            | Self::UnreadableBody(_)
            | Self::BodyTooLarge(_)
            | Self::NameTaken(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Store(_) => Status::InternalServerError,
        }
    }

    /// The body sent to the client.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid ID",
            Self::EmptyName => "Empty name forbidden.",
            Self::MalformedBody(_) | Self::UnreadableBody(_) | Self::BodyTooLarge(_) => {
                "Malformed body."
            }
            Self::NameTaken(_) => "Name taken.",
            Self::NotFound(_) => "Not found",
            Self::Store(_) => "Server error",
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::ConstraintViolation(what) => Self::NameTaken(what),
            err @ StoreError::Storage(_) => Self::Store(err),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let id = req.local_cache(RequestId::next);
        let status = self.status();
        if status == Status::InternalServerError {
            log::error!("req{id} failed: {self}");
        } else {
            log::debug!("req{id} rejected: {self}");
        }
        (status, self.client_message()).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let not_found: Error = StoreError::NotFound("Election 7".to_string()).into();
        assert_eq!(not_found.status(), Status::NotFound);
        assert_eq!(not_found.client_message(), "Not found");

        let taken: Error = StoreError::ConstraintViolation("Election x".to_string()).into();
        assert_eq!(taken.status(), Status::BadRequest);
        assert_eq!(taken.client_message(), "Name taken.");

        let storage: Error = StoreError::storage("disk on fire").into();
        assert_eq!(storage.status(), Status::InternalServerError);
        assert_eq!(storage.client_message(), "Server error");
    }

    #[test]
    fn unreadable_bodies_are_malformed() {
        let errors = [
            Error::from(io::Error::new(io::ErrorKind::InvalidData, "invalid utf-8")),
            Error::BodyTooLarge(ByteUnit::Mebibyte(1)),
        ];
        for err in errors {
            assert_eq!(err.status(), Status::BadRequest);
            assert_eq!(err.client_message(), "Malformed body.");
        }
    }

    #[test]
    fn storage_detail_is_not_in_client_message() {
        let err: Error = StoreError::storage("connection refused: 10.0.0.7:27017").into();
        assert!(err.to_string().contains("10.0.0.7"));
        assert!(!err.client_message().contains("10.0.0.7"));
    }
}
