use std::{error::Error as StdError, fmt};
use thiserror::Error as ThisError;

// re-exports
pub use crate::group::GroupStateError;

///
/// ListError
///
/// Error returned by controller and session operations.
///

#[derive(Debug, ThisError)]
pub enum ListError {
    #[error("{0}")]
    Group(#[from] GroupStateError),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Decode(#[from] DecodeError),
}

impl ListError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Group(GroupStateError::InvalidStateTransition { .. }) => {
                ErrorClass::InvalidStateTransition
            }
            Self::Group(GroupStateError::NotAGroup { .. }) => ErrorClass::NotAGroup,
            Self::Page(PageError::MalformedMeta { .. }) => ErrorClass::MalformedMeta,
            Self::Page(PageError::OutOfRange { .. }) => ErrorClass::OutOfRange,
            Self::Fetch(_) => ErrorClass::Fetch,
            Self::Decode(_) => ErrorClass::Decode,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// PageError
///
/// List metadata cannot support the requested navigation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PageError {
    #[error("list meta is malformed: '{field}' is missing or zero")]
    MalformedMeta { field: &'static str },

    #[error("page {page} is outside 1..={num_pages}")]
    OutOfRange { page: u32, num_pages: u32 },
}

///
/// FetchError
///
/// Opaque transport failure reported by the fetch collaborator.
/// The engine never retries or interprets it.
///

#[derive(Debug, ThisError)]
#[error("fetch failed: {message}")]
pub struct FetchError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

///
/// DecodeError
///

#[derive(Debug, ThisError)]
#[error("failed to decode list response: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

///
/// ErrorClass
/// Stable classification for list errors.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidStateTransition,
    NotAGroup,
    MalformedMeta,
    OutOfRange,
    Fetch,
    Decode,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidStateTransition => "invalid_state_transition",
            Self::NotAGroup => "not_a_group",
            Self::MalformedMeta => "malformed_meta",
            Self::OutOfRange => "out_of_range",
            Self::Fetch => "fetch",
            Self::Decode => "decode",
        };
        write!(f, "{label}")
    }
}
