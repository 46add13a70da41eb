use derive_more::Display;
use martview_config::ConfigError;
use martview_core::error::{GroupStateError, ListError, PageError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ListError> for Error {
    fn from(err: ListError) -> Self {
        let kind = match &err {
            ListError::Group(GroupStateError::InvalidStateTransition { .. }) => {
                ErrorKind::Group(GroupErrorKind::InvalidStateTransition)
            }
            ListError::Group(GroupStateError::NotAGroup { .. }) => {
                ErrorKind::Group(GroupErrorKind::NotAGroup)
            }
            ListError::Page(PageError::MalformedMeta { .. }) => {
                ErrorKind::Page(PageErrorKind::MalformedMeta)
            }
            ListError::Page(PageError::OutOfRange { .. }) => {
                ErrorKind::Page(PageErrorKind::OutOfRange)
            }
            ListError::Fetch(_) => ErrorKind::Fetch,
            ListError::Decode(_) => ErrorKind::Decode,
        };

        Self::new(kind, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match &err {
            ConfigError::Io { .. } => ConfigErrorKind::Unreadable,
            ConfigError::Parse(_) => ConfigErrorKind::Malformed,
            ConfigError::Invalid { .. } => ConfigErrorKind::Invalid,
        };

        Self::new(ErrorKind::Config(kind), err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and UI bindings.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Group(GroupErrorKind),
    Page(PageErrorKind),
    Config(ConfigErrorKind),

    /// The fetch collaborator failed; the message is its own.
    Fetch,

    /// The list endpoint answered with a body that is not a list page.
    Decode,
}

///
/// GroupErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum GroupErrorKind {
    /// Open while open, or close while closed.
    InvalidStateTransition,

    /// Only entities with a positive group size can be expanded.
    NotAGroup,
}

///
/// PageErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum PageErrorKind {
    MalformedMeta,
    OutOfRange,
}

///
/// ConfigErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ConfigErrorKind {
    Unreadable,
    Malformed,
    Invalid,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use martview_core::{
        error::FetchError,
        group::{GroupAction, GroupStateKind},
        types::EntityId,
    };

    #[test]
    fn list_errors_keep_their_message() {
        let err: Error = ListError::from(GroupStateError::NotAGroup {
            id: EntityId::new(4),
        })
        .into();

        assert_eq!(err.kind, ErrorKind::Group(GroupErrorKind::NotAGroup));
        assert!(err.message.contains('4'));
    }

    #[test]
    fn group_transition_errors_map_to_group_kind() {
        let err = Error::from(ListError::from(GroupStateError::InvalidStateTransition {
            action: GroupAction::Close,
            state: GroupStateKind::Closed,
        }));

        assert_eq!(
            err.kind,
            ErrorKind::Group(GroupErrorKind::InvalidStateTransition)
        );
        assert_eq!(
            err.message,
            "invalid group transition: cannot close a group while closed"
        );
    }

    #[test]
    fn fetch_errors_map_to_fetch_kind() {
        let err: Error = ListError::from(FetchError::new("gateway timeout")).into();

        assert_eq!(err.kind, ErrorKind::Fetch);
        assert!(err.message.contains("gateway timeout"));
    }

    #[test]
    fn config_errors_map_to_config_kind() {
        let source = martview_config::CatalogConfig::from_toml_str("[paginator]\nleading_threshold = 9")
            .expect_err("threshold above displayed is rejected");
        let err = Error::from(source);

        assert_eq!(err.kind, ErrorKind::Config(ConfigErrorKind::Invalid));
    }

    #[test]
    fn error_round_trips_through_json() {
        let err = Error::new(ErrorKind::Page(PageErrorKind::OutOfRange), "page 11 of 10");

        let json = serde_json::to_string(&err).expect("error serializes");
        let back: Error = serde_json::from_str(&json).expect("error deserializes");

        assert_eq!(back, err);
    }
}
