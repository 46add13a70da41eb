//! Module: query::request
//! Responsibility: fetch descriptors handed to the external fetch collaborator.
//! Does not own: transport, retries, or response application.

use crate::{
    model::ListMeta,
    query::{OptionValue, RequestOptions},
    types::{DataMartId, EntityId},
};
use derive_more::Display;
use std::collections::BTreeSet;

///
/// FetchMode
///
/// How a fetched page combines with the items already shown.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FetchMode {
    /// Results replace the current item set (explicit page navigation).
    #[display("replace")]
    Replace,

    /// Results are concatenated to the current item set (infinite scroll).
    #[display("append")]
    Append,
}

impl FetchMode {
    #[must_use]
    pub const fn is_append(self) -> bool {
        matches!(self, Self::Append)
    }
}

///
/// FetchIntent
///
/// Why a request was built. The session uses it to maintain group context
/// when the response is applied.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FetchIntent {
    Navigate,
    ScrollAppend,
    Reorder,
    OpenGroup {
        group_id: EntityId,
        group_name: Option<String>,
    },
    CloseGroup,
}

impl FetchIntent {
    #[must_use]
    pub const fn kind(&self) -> IntentKind {
        match self {
            Self::Navigate => IntentKind::Navigate,
            Self::ScrollAppend => IntentKind::ScrollAppend,
            Self::Reorder => IntentKind::Reorder,
            Self::OpenGroup { .. } => IntentKind::OpenGroup,
            Self::CloseGroup => IntentKind::CloseGroup,
        }
    }
}

///
/// IntentKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum IntentKind {
    #[display("navigate")]
    Navigate,
    #[display("scroll_append")]
    ScrollAppend,
    #[display("reorder")]
    Reorder,
    #[display("open_group")]
    OpenGroup,
    #[display("close_group")]
    CloseGroup,
}

///
/// FetchRequest
///
/// Everything the fetch collaborator needs to issue one list GET.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchRequest {
    pub mart_id: DataMartId,
    pub subj_ids: BTreeSet<EntityId>,
    pub options: RequestOptions,
    pub limit: u32,
    pub mode: FetchMode,
    pub intent: FetchIntent,
}

impl FetchRequest {
    /// Build a request against the mart, subjects and limit of `meta`.
    #[must_use]
    pub fn for_meta(
        meta: &ListMeta,
        options: RequestOptions,
        mode: FetchMode,
        intent: FetchIntent,
    ) -> Self {
        Self {
            mart_id: meta.data_mart,
            subj_ids: meta.subj_ids.clone(),
            options,
            limit: meta.limit,
            mode,
            intent,
        }
    }

    #[must_use]
    pub const fn is_append(&self) -> bool {
        self.mode.is_append()
    }

    /// Requested offset; a request without one starts at the first row.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.options.offset().unwrap_or(0)
    }

    /// Query parameters in endpoint order:
    /// `offset, limit, <filter keys>, subj_ids, alike`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (RequestOptions::OFFSET.to_string(), self.offset().to_string()),
            (RequestOptions::LIMIT.to_string(), self.limit.to_string()),
        ];

        pairs.extend(
            self.options
                .iter()
                .filter(|(key, _)| {
                    !matches!(
                        *key,
                        RequestOptions::OFFSET | RequestOptions::LIMIT | RequestOptions::ALIKE
                    )
                })
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );

        if !self.subj_ids.is_empty() {
            let ids = OptionValue::List(
                self.subj_ids
                    .iter()
                    .map(|id| OptionValue::from(*id))
                    .collect(),
            );
            pairs.push(("subj_ids".to_string(), ids.to_string()));
        }

        if let Some(value) = self.options.get(RequestOptions::ALIKE) {
            pairs.push((RequestOptions::ALIKE.to_string(), value.to_string()));
        }

        pairs
    }

    /// Percent-encoded `key=value&...` form of [`Self::query_pairs`].
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

///
/// TESTS
///
