//! ## Crate layout
//! - `core`: page windows, request options, group transitions, scroll
//!   appends, response decoding, and the list session.
//! - `config`: TOML catalog configuration.
//! - `error`: the public error taxonomy.
//!
//! The `prelude` module mirrors what a catalog view binding needs.

pub use martview_config as config;
pub use martview_core as core;

pub mod error;

use martview_config::CatalogConfig;
use martview_core::{controller::EntityListController, model::ListMeta, session::ListSession};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;

/// Validate `config` and start a session over `meta` with it.
pub fn session(config: &CatalogConfig, meta: ListMeta) -> Result<ListSession, Error> {
    config.validate()?;

    Ok(ListSession::new(
        EntityListController::from_config(config),
        meta,
    ))
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        config::CatalogConfig,
        core::{
            controller::EntityListController,
            group::Activation,
            model::{Entity, GroupContext, ListMeta},
            query::{FetchMode, FetchRequest, RequestOptions},
            response::ListPage,
            scroll::ScrollGeometry,
            session::{ApplyOutcome, Fetcher, ListSession, PendingFetch},
            types::{DataMartId, EntityId},
            window::{PageItem, PageWindow},
        },
    };
}
