use crate::{
    query::RequestOptions,
    types::{DataMartId, EntityId},
};
use std::collections::BTreeSet;

///
/// ListMeta
///
/// Pagination and filter state of one catalog view. Owned by the list
/// session for the lifetime of that view.
///
/// `offset` is a multiple of `limit` when reached through page navigation;
/// scroll appends only ever add `limit` to it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListMeta {
    pub data_mart: DataMartId,
    pub limit: u32,
    pub offset: u32,
    pub count: u32,
    pub subj_ids: BTreeSet<EntityId>,
    pub request_options: RequestOptions,
    pub group: Option<GroupContext>,
}

impl ListMeta {
    /// Meta for a view that has not loaded anything yet.
    #[must_use]
    pub const fn new(data_mart: DataMartId, limit: u32) -> Self {
        Self {
            data_mart,
            limit,
            offset: 0,
            count: 0,
            subj_ids: BTreeSet::new(),
            request_options: RequestOptions::new(),
            group: None,
        }
    }

    #[must_use]
    pub fn with_subjects(mut self, subj_ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.subj_ids = subj_ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_options(mut self, request_options: RequestOptions) -> Self {
        self.request_options = request_options;
        self
    }

    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    /// Copy of this meta with any group context removed.
    #[must_use]
    pub fn ungrouped(&self) -> Self {
        Self {
            group: None,
            ..self.clone()
        }
    }
}

///
/// GroupContext
///
/// Present while a group is expanded. `origin` is the list meta from just
/// before the group was opened; closing the group restores from it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupContext {
    pub group_id: EntityId,
    pub group_name: Option<String>,
    pub origin: Box<ListMeta>,
}
