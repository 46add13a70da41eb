//! Module: group
//! Responsibility: expand/collapse transitions for "alike" groups.
//! Does not own: fetching, or attaching context to applied responses beyond
//! the transition helpers below.

use crate::{
    model::{Entity, GroupContext, ListMeta},
    query::{FetchIntent, FetchMode, FetchRequest, RequestOptionsBuilder},
    types::EntityId,
};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// GroupStateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum GroupStateError {
    #[error("invalid group transition: cannot {action} a group while {state}")]
    InvalidStateTransition {
        action: GroupAction,
        state: GroupStateKind,
    },

    #[error("entity {id} is not a group representative")]
    NotAGroup { id: EntityId },
}

impl GroupStateError {
    const fn invalid(action: GroupAction, state: GroupStateKind) -> Self {
        Self::InvalidStateTransition { action, state }
    }
}

///
/// GroupAction
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum GroupAction {
    #[display("open")]
    Open,
    #[display("close")]
    Close,
}

///
/// GroupStateKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum GroupStateKind {
    #[display("closed")]
    Closed,
    #[display("open")]
    Open,
}

///
/// GroupState
///
/// Borrowed view of the group state machine carried by a [`ListMeta`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupState<'a> {
    Closed,
    Open(&'a GroupContext),
}

impl<'a> GroupState<'a> {
    #[must_use]
    pub const fn of(meta: &'a ListMeta) -> Self {
        match &meta.group {
            Some(context) => Self::Open(context),
            None => Self::Closed,
        }
    }

    #[must_use]
    pub const fn kind(self) -> GroupStateKind {
        match self {
            Self::Closed => GroupStateKind::Closed,
            Self::Open(_) => GroupStateKind::Open,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}

///
/// Activation
///
/// What activating an entity card should do.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Activation {
    /// The entity represents a collapsed group; issue this fetch.
    OpenGroup(FetchRequest),

    /// A plain entity; the UI navigates to its detail view.
    NavigateToDetail { id: EntityId },
}

///
/// GroupStateManager
///
/// Pure transition functions over the group state held by a [`ListMeta`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GroupStateManager;

impl GroupStateManager {
    /// Decide what activating `entity` does under the current meta.
    pub fn activate(entity: &Entity, meta: &ListMeta) -> Result<Activation, GroupStateError> {
        if entity.is_group() {
            Self::open_group(entity, meta).map(Activation::OpenGroup)
        } else {
            Ok(Activation::NavigateToDetail { id: entity.id })
        }
    }

    /// `Closed -> Open`: request only the grouped subset of `entity`.
    ///
    /// The current options, `offset` included, are carried over with
    /// `alike` added. Closing the group drops both keys again.
    pub fn open_group(entity: &Entity, meta: &ListMeta) -> Result<FetchRequest, GroupStateError> {
        let state = GroupState::of(meta);
        if state.is_open() {
            return Err(GroupStateError::invalid(GroupAction::Open, state.kind()));
        }
        if !entity.is_group() {
            return Err(GroupStateError::NotAGroup { id: entity.id });
        }

        let options = RequestOptionsBuilder::from_options(&meta.request_options)
            .alike(entity.id)
            .build();

        Ok(FetchRequest::for_meta(
            meta,
            options,
            FetchMode::Replace,
            FetchIntent::OpenGroup {
                group_id: entity.id,
                group_name: entity.group_name.clone(),
            },
        ))
    }

    /// `Open -> Closed`: drop the group keys and restore the pre-group
    /// subjects.
    pub fn close_group(meta: &ListMeta) -> Result<FetchRequest, GroupStateError> {
        let GroupState::Open(context) = GroupState::of(meta) else {
            return Err(GroupStateError::invalid(
                GroupAction::Close,
                GroupStateKind::Closed,
            ));
        };

        Ok(FetchRequest {
            mart_id: meta.data_mart,
            subj_ids: context.origin.subj_ids.clone(),
            options: meta.request_options.without_group_keys(),
            limit: meta.limit,
            mode: FetchMode::Replace,
            intent: FetchIntent::CloseGroup,
        })
    }

    /// Build the group context to attach once an open-group fetch lands.
    #[must_use]
    pub fn enter(origin: &ListMeta, group_id: EntityId, group_name: Option<String>) -> GroupContext {
        GroupContext {
            group_id,
            group_name,
            origin: Box::new(origin.ungrouped()),
        }
    }
}

///
/// TESTS
///
