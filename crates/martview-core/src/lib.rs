//! Core engine for Martview: page windows, request options, group
//! transitions, scroll-driven appends, and the list session that applies
//! fetched pages.
//!
//! Nothing in this crate performs I/O. Operations return [`query::FetchRequest`]
//! descriptors that an external fetch collaborator executes.
#![warn(unreachable_pub)]

pub mod controller;
pub mod error;
pub mod group;
pub mod model;
pub mod obs;
pub mod query;
pub mod response;
pub mod scroll;
pub mod session;
pub mod types;
pub mod window;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or session internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        controller::EntityListController,
        group::Activation,
        model::{Entity, GroupContext, ListMeta},
        query::{FetchMode, FetchRequest, RequestOptions},
        scroll::ScrollGeometry,
        types::{DataMartId, EntityId},
        window::{PageItem, PageWindow},
    };
}
