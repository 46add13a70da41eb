//! Module: scroll
//! Responsibility: decide when scrolling should append the next page.
//! Does not own: the loading latch itself (the session holds it).

use crate::{
    error::PageError,
    model::ListMeta,
    query::{FetchIntent, FetchMode, FetchRequest},
};
use martview_config::ScrollConfig;

///
/// ScrollGeometry
///
/// Scroll position as reported by the list view, in view units.
///

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollGeometry {
    pub content_offset_y: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollGeometry {
    #[must_use]
    pub const fn new(content_offset_y: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            content_offset_y,
            viewport_height,
            content_height,
        }
    }
}

///
/// ScrollFetchTrigger
///
/// Fires once the visible edge plus `lookahead_viewports` viewport heights
/// passes the end of the loaded content.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFetchTrigger {
    lookahead_viewports: f64,
}

impl ScrollFetchTrigger {
    #[must_use]
    pub const fn new(lookahead_viewports: f64) -> Self {
        Self {
            lookahead_viewports,
        }
    }

    #[must_use]
    pub const fn lookahead_viewports(&self) -> f64 {
        self.lookahead_viewports
    }

    /// Whether the next page should be requested.
    #[must_use]
    pub fn should_fetch(
        &self,
        geometry: &ScrollGeometry,
        items_len: usize,
        count: u32,
        loading: bool,
    ) -> bool {
        if loading {
            return false;
        }

        let reach = geometry.viewport_height.mul_add(
            self.lookahead_viewports,
            geometry.content_offset_y,
        );
        let has_more = usize::try_from(count).unwrap_or(usize::MAX) > items_len;

        reach > geometry.content_height && has_more
    }

    /// Build the append request for the next page, if scrolling calls for one.
    pub fn append_request(
        &self,
        meta: &ListMeta,
        items_len: usize,
        geometry: &ScrollGeometry,
        loading: bool,
    ) -> Result<Option<FetchRequest>, PageError> {
        if !self.should_fetch(geometry, items_len, meta.count, loading) {
            return Ok(None);
        }
        if meta.limit == 0 {
            return Err(PageError::MalformedMeta { field: "limit" });
        }

        let next_offset = meta.offset.saturating_add(meta.limit);

        Ok(Some(FetchRequest::for_meta(
            meta,
            meta.request_options.with_offset(next_offset),
            FetchMode::Append,
            FetchIntent::ScrollAppend,
        )))
    }
}

impl Default for ScrollFetchTrigger {
    fn default() -> Self {
        Self::new(ScrollConfig::DEFAULT_LOOKAHEAD_VIEWPORTS)
    }
}

impl From<&ScrollConfig> for ScrollFetchTrigger {
    fn from(config: &ScrollConfig) -> Self {
        Self::new(config.lookahead_viewports)
    }
}

///
/// TESTS
///
