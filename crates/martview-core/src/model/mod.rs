mod entity;
mod meta;

pub use entity::Entity;
pub use meta::{GroupContext, ListMeta};
