//! Module: response
//! Responsibility: list endpoint payload decoding.
//! Does not own: applying pages to a session (see `session`).

use crate::{
    error::DecodeError,
    model::{Entity, ListMeta},
    query::FetchRequest,
    types::{DataMartId, EntityId},
};
use serde::Deserialize;
use std::collections::BTreeSet;

///
/// ListPage
///
/// One list endpoint response: `{ items, meta }`.
/// `objects` is accepted as an alias for `items`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ListPage {
    #[serde(alias = "objects")]
    pub items: Vec<Entity>,
    #[serde(default)]
    pub meta: PageMeta,
}

impl ListPage {
    #[must_use]
    pub const fn new(items: Vec<Entity>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(source)?)
    }
}

///
/// PageMeta
///
/// Response metadata as sent by the server. Every field is optional on the
/// wire; a missing `limit` or `count` degrades to an empty page window.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct PageMeta {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
    pub subj_ids: Option<BTreeSet<EntityId>>,
    pub data_mart: Option<DataMartRef>,
    pub alike: Option<AlikeMeta>,
}

impl PageMeta {
    #[must_use]
    pub const fn counted(limit: u32, offset: u32, count: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            count: Some(count),
            subj_ids: None,
            data_mart: None,
            alike: None,
        }
    }

    /// Resolve into list meta for the request that produced this page.
    ///
    /// Filter options always come from the request; the server's echo of
    /// them is not trusted. Group context is left to the caller.
    #[must_use]
    pub fn resolve(self, request: &FetchRequest) -> ListMeta {
        ListMeta {
            data_mart: self.data_mart.map_or(request.mart_id, |mart| mart.id),
            limit: self.limit.unwrap_or(0),
            offset: self.offset.unwrap_or_else(|| request.offset()),
            count: self.count.unwrap_or(0),
            subj_ids: self.subj_ids.unwrap_or_else(|| request.subj_ids.clone()),
            request_options: request.options.clone(),
            group: None,
        }
    }
}

///
/// DataMartRef
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct DataMartRef {
    pub id: DataMartId,
}

///
/// AlikeMeta
///
/// Present while the response is the expanded subset of one group.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct AlikeMeta {
    pub id: EntityId,
    pub group_name: Option<String>,
}

///
/// TESTS
///
