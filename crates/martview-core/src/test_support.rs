use crate::{
    model::{Entity, ListMeta},
    query::RequestOptions,
    types::{DataMartId, EntityId},
};

pub(crate) const TEST_MART: DataMartId = DataMartId::new(12);

/// Loaded meta for the test mart whose options carry the current offset.
pub(crate) fn meta_with(limit: u32, offset: u32, count: u32) -> ListMeta {
    let mut meta = ListMeta::new(TEST_MART, limit);
    meta.offset = offset;
    meta.count = count;
    meta.request_options = RequestOptions::new().with_offset(offset);

    meta
}

/// Plain entities with consecutive ids starting at `first`.
pub(crate) fn entities(first: u64, len: u64) -> Vec<Entity> {
    (first..first + len)
        .map(|id| Entity::new(EntityId::new(id)))
        .collect()
}
