//! Module: controller
//! Responsibility: the operations the UI layer calls against a list meta.
//! Does not own: I/O, the loading latch, or applying responses.
//!
//! Every operation is a pure computation over its inputs and returns a
//! [`FetchRequest`] descriptor for the caller to execute.

use crate::{
    error::{ListError, PageError},
    group::{Activation, GroupStateManager},
    model::{Entity, ListMeta},
    query::{FetchIntent, FetchMode, FetchRequest, OptionValue, RequestOptions},
    scroll::{ScrollFetchTrigger, ScrollGeometry},
    window::{PageItem, PageWindow, WindowPolicy, compute_page_window},
};
use martview_config::CatalogConfig;

///
/// EntityListController
///

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntityListController {
    window: WindowPolicy,
    scroll: ScrollFetchTrigger,
    hide_page_numbers: bool,
}

impl EntityListController {
    #[must_use]
    pub const fn new(window: WindowPolicy, scroll: ScrollFetchTrigger) -> Self {
        Self {
            window,
            scroll,
            hide_page_numbers: false,
        }
    }

    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            window: WindowPolicy::from(&config.paginator),
            scroll: ScrollFetchTrigger::from(&config.scroll),
            hide_page_numbers: config.paginator.hide_page_numbers,
        }
    }

    #[must_use]
    pub const fn hide_page_numbers(mut self, hide: bool) -> Self {
        self.hide_page_numbers = hide;
        self
    }

    #[must_use]
    pub const fn window_policy(&self) -> &WindowPolicy {
        &self.window
    }

    #[must_use]
    pub const fn scroll_trigger(&self) -> &ScrollFetchTrigger {
        &self.scroll
    }

    // ---------------------------------------------------------------------
    // Page window
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn compute_window(&self, meta: &ListMeta) -> PageWindow {
        compute_page_window(meta.offset, meta.limit, meta.count, &self.window)
    }

    #[must_use]
    pub fn page_items(&self, meta: &ListMeta) -> Vec<PageItem> {
        self.compute_window(meta).items(self.hide_page_numbers)
    }

    // ---------------------------------------------------------------------
    // Page navigation (replace mode)
    // ---------------------------------------------------------------------

    /// Request the page starting at `target_offset`.
    #[must_use]
    pub fn request_page(&self, meta: &ListMeta, target_offset: u32) -> FetchRequest {
        FetchRequest::for_meta(
            meta,
            meta.request_options.with_offset(target_offset),
            FetchMode::Replace,
            FetchIntent::Navigate,
        )
    }

    /// Request the 1-based page `page`.
    pub fn request_page_number(&self, meta: &ListMeta, page: u32) -> Result<FetchRequest, ListError> {
        let window = self.checked_window(meta)?;
        if page == 0 || page > window.num_pages {
            return Err(PageError::OutOfRange {
                page,
                num_pages: window.num_pages,
            }
            .into());
        }

        Ok(self.request_page(meta, meta.limit.saturating_mul(page - 1)))
    }

    /// Request the rows after the current page. Steps by `limit` from the
    /// current offset, which need not sit on a page boundary.
    pub fn request_next(&self, meta: &ListMeta) -> Result<FetchRequest, ListError> {
        let window = self.checked_window(meta)?;
        if meta.offset.saturating_add(meta.limit) >= meta.count {
            return Err(PageError::OutOfRange {
                page: window.current_page.saturating_add(1),
                num_pages: window.num_pages,
            }
            .into());
        }

        Ok(self.request_page(meta, meta.offset.saturating_add(meta.limit)))
    }

    /// Request the rows before the current page, stopping at offset 0.
    pub fn request_previous(&self, meta: &ListMeta) -> Result<FetchRequest, ListError> {
        let window = self.checked_window(meta)?;
        if meta.offset == 0 {
            return Err(PageError::OutOfRange {
                page: window.current_page.saturating_sub(1),
                num_pages: window.num_pages,
            }
            .into());
        }

        Ok(self.request_page(meta, meta.offset.saturating_sub(meta.limit)))
    }

    // Window for explicit navigation; a zero limit cannot address pages.
    fn checked_window(&self, meta: &ListMeta) -> Result<PageWindow, PageError> {
        if meta.limit == 0 {
            return Err(PageError::MalformedMeta { field: "limit" });
        }

        Ok(self.compute_window(meta))
    }

    // ---------------------------------------------------------------------
    // Ordering and filters
    // ---------------------------------------------------------------------

    /// Switch the sort order; the list restarts from its first page.
    #[must_use]
    pub fn request_ordering(&self, meta: &ListMeta, ordering: impl Into<OptionValue>) -> FetchRequest {
        let delta = RequestOptions::new().with(RequestOptions::ORDERING, ordering);

        self.reset_with(meta, &delta, FetchIntent::Reorder)
    }

    /// Merge a filter delta; the list restarts from its first page.
    #[must_use]
    pub fn request_options_change(&self, meta: &ListMeta, delta: &RequestOptions) -> FetchRequest {
        self.reset_with(meta, delta, FetchIntent::Navigate)
    }

    fn reset_with(&self, meta: &ListMeta, delta: &RequestOptions, intent: FetchIntent) -> FetchRequest {
        FetchRequest::for_meta(
            meta,
            meta.request_options.merged(delta).with_offset(0),
            FetchMode::Replace,
            intent,
        )
    }

    // ---------------------------------------------------------------------
    // Scroll (append mode)
    // ---------------------------------------------------------------------

    pub fn request_scroll_append(
        &self,
        meta: &ListMeta,
        items_len: usize,
        geometry: &ScrollGeometry,
        loading: bool,
    ) -> Result<Option<FetchRequest>, ListError> {
        Ok(self
            .scroll
            .append_request(meta, items_len, geometry, loading)?)
    }

    // ---------------------------------------------------------------------
    // Groups
    // ---------------------------------------------------------------------

    pub fn activate(&self, entity: &Entity, meta: &ListMeta) -> Result<Activation, ListError> {
        Ok(GroupStateManager::activate(entity, meta)?)
    }

    pub fn open_group(&self, entity: &Entity, meta: &ListMeta) -> Result<FetchRequest, ListError> {
        Ok(GroupStateManager::open_group(entity, meta)?)
    }

    pub fn close_group(&self, meta: &ListMeta) -> Result<FetchRequest, ListError> {
        Ok(GroupStateManager::close_group(meta)?)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorClass, test_support::meta_with, types::EntityId};

    #[test]
    fn request_page_is_idempotent() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 0, 1000);

        let first = controller.request_page(&meta, 70);
        let second = controller.request_page(&meta, 70);

        assert_eq!(first, second);
        assert_eq!(first.offset(), 70);
        assert_eq!(first.mode, FetchMode::Replace);
        assert_eq!(meta.request_options.offset(), Some(0));
    }

    #[test]
    fn page_number_maps_to_limit_multiple() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 0, 1000);

        assert_eq!(
            controller
                .request_page_number(&meta, 46)
                .expect("page in range")
                .offset(),
            450
        );
        assert_eq!(
            controller
                .request_page_number(&meta, 1)
                .expect("page in range")
                .offset(),
            0
        );
    }

    #[test]
    fn page_number_out_of_range_is_rejected() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 0, 1000);

        for page in [0, 101] {
            let err = controller
                .request_page_number(&meta, page)
                .expect_err("page out of range");
            assert_eq!(err.class(), ErrorClass::OutOfRange);
        }
    }

    #[test]
    fn next_and_previous_step_by_limit() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 450, 1000);

        assert_eq!(controller.request_next(&meta).expect("has next").offset(), 460);
        assert_eq!(
            controller
                .request_previous(&meta)
                .expect("has previous")
                .offset(),
            440
        );
    }

    #[test]
    fn previous_on_first_page_is_rejected() {
        let controller = EntityListController::default();
        let err = controller
            .request_previous(&meta_with(10, 0, 1000))
            .expect_err("no previous page");

        assert!(matches!(
            err,
            ListError::Page(PageError::OutOfRange {
                page: 0,
                num_pages: 100
            })
        ));
    }

    #[test]
    fn previous_from_unaligned_offset_clamps_to_start() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 5, 1000);

        let request = controller
            .request_previous(&meta)
            .expect("rows before offset 5 exist");

        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn next_past_last_row_is_rejected() {
        let controller = EntityListController::default();

        assert_eq!(
            controller
                .request_next(&meta_with(10, 985, 1000))
                .expect("rows 995.. remain")
                .offset(),
            995
        );

        let err = controller
            .request_next(&meta_with(10, 995, 1000))
            .expect_err("no rows after the last page");
        assert_eq!(err.class(), ErrorClass::OutOfRange);
    }

    #[test]
    fn next_with_zero_limit_is_malformed() {
        let controller = EntityListController::default();
        let err = controller
            .request_next(&meta_with(0, 0, 1000))
            .expect_err("zero limit");

        assert_eq!(err.class(), ErrorClass::MalformedMeta);
    }

    #[test]
    fn ordering_change_resets_offset() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 450, 1000);

        let request = controller.request_ordering(&meta, "-created_at");

        assert_eq!(request.offset(), 0);
        assert_eq!(request.intent, FetchIntent::Reorder);
        assert_eq!(
            request.options.get(RequestOptions::ORDERING),
            Some(&OptionValue::Text("-created_at".to_string()))
        );
    }

    #[test]
    fn options_change_merges_and_resets_offset() {
        let controller = EntityListController::default();
        let meta = meta_with(10, 450, 1000).with_options(
            RequestOptions::new()
                .with_offset(450)
                .with("ordering", "name"),
        );
        let delta = RequestOptions::new().with("terms", OptionValue::List(vec![4u64.into()]));

        let request = controller.request_options_change(&meta, &delta);

        assert_eq!(request.offset(), 0);
        assert!(request.options.contains("terms"));
        assert!(request.options.contains("ordering"));
    }

    #[test]
    fn close_group_when_closed_reports_invalid_transition() {
        let controller = EntityListController::default();
        let err = controller
            .close_group(&meta_with(10, 0, 10))
            .expect_err("no open group");

        assert_eq!(err.class(), ErrorClass::InvalidStateTransition);
    }

    #[test]
    fn open_group_surfaces_not_a_group() {
        let controller = EntityListController::default();
        let err = controller
            .open_group(&Entity::new(EntityId::new(1)), &meta_with(10, 0, 10))
            .expect_err("plain entity");

        assert_eq!(err.class(), ErrorClass::NotAGroup);
    }

    #[test]
    fn config_drives_policies() {
        let config = CatalogConfig::from_toml_str(
            "[paginator]\nhide_page_numbers = true\n[scroll]\nlookahead_viewports = 4.0\n",
        )
        .expect("valid config");
        let controller = EntityListController::from_config(&config);

        assert!((controller.scroll_trigger().lookahead_viewports() - 4.0).abs() < f64::EPSILON);
        assert_eq!(
            controller.page_items(&meta_with(10, 0, 1000)),
            vec![
                PageItem::Previous { enabled: false },
                PageItem::Next { enabled: true },
            ]
        );
    }
}
