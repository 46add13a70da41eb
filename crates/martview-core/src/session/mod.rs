//! Module: session
//! Responsibility: one catalog view's list state, its loading latch, and
//! ordered application of fetched pages.
//! Does not own: request construction rules (see `controller`) or transport.
//!
//! Every fetch is tagged with a monotonically increasing generation. Only the
//! response for the latest issued generation is applied; older responses are
//! reported and dropped.


use crate::{
    controller::EntityListController,
    error::{FetchError, ListError},
    group::GroupStateManager,
    model::{Entity, ListMeta},
    obs::{ListEvent, ListEventSink},
    query::{FetchIntent, FetchMode, FetchRequest},
    response::ListPage,
    scroll::ScrollGeometry,
    window::{PageItem, PageWindow},
};
use std::rc::Rc;

///
/// Fetcher
///
/// External collaborator that executes a [`FetchRequest`] against the list
/// endpoint.
///

pub trait Fetcher {
    fn fetch(&self, request: &FetchRequest) -> impl Future<Output = Result<ListPage, FetchError>>;
}

///
/// PendingFetch
///
/// Handle for one issued fetch. Hand it back to [`ListSession::complete`]
/// together with the collaborator's result.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingFetch {
    generation: u64,
    request: FetchRequest,
}

impl PendingFetch {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn request(&self) -> &FetchRequest {
        &self.request
    }
}

///
/// ApplyOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApplyOutcome {
    /// The page was applied; `rows` items were added or now shown.
    Applied { rows: usize },

    /// A newer fetch was issued after this one; the page was dropped.
    Stale { generation: u64, latest: u64 },
}

///
/// ListSession
///
/// Session-scoped list state. Single writer: only the session mutates its
/// meta and items.
///

pub struct ListSession {
    controller: EntityListController,
    meta: ListMeta,
    items: Vec<Entity>,
    loading: bool,
    generation: u64,
    sink: Option<Rc<dyn ListEventSink>>,
}

impl ListSession {
    #[must_use]
    pub const fn new(controller: EntityListController, meta: ListMeta) -> Self {
        Self {
            controller,
            meta,
            items: Vec::new(),
            loading: false,
            generation: 0,
            sink: None,
        }
    }

    #[must_use]
    pub fn event_sink(mut self, sink: Rc<dyn ListEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn record(&self, event: ListEvent) {
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    #[must_use]
    pub const fn controller(&self) -> &EntityListController {
        &self.controller
    }

    #[must_use]
    pub const fn meta(&self) -> &ListMeta {
        &self.meta
    }

    #[must_use]
    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Generation of the most recently issued fetch (0 before any fetch).
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        self.controller.compute_window(&self.meta)
    }

    #[must_use]
    pub fn page_items(&self) -> Vec<PageItem> {
        self.controller.page_items(&self.meta)
    }

    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        self.meta.group.as_ref()?.group_name.as_deref()
    }

    // ---------------------------------------------------------------------
    // Fetch lifecycle
    // ---------------------------------------------------------------------

    /// Issue `request`: raise the loading latch, bump the generation, and
    /// emit the loading-started event. Call before dispatching the fetch.
    pub fn begin(&mut self, request: FetchRequest) -> PendingFetch {
        self.generation = self.generation.saturating_add(1);
        self.loading = true;

        self.record(ListEvent::LoadingStarted {
            generation: self.generation,
            mode: request.mode,
            intent: request.intent.kind(),
        });

        PendingFetch {
            generation: self.generation,
            request,
        }
    }

    /// Apply the collaborator's result for `pending`.
    ///
    /// Results for anything but the latest generation are dropped, including
    /// failures. A failure of the latest fetch releases the latch and is
    /// returned unchanged.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        result: Result<ListPage, FetchError>,
    ) -> Result<ApplyOutcome, ListError> {
        let PendingFetch {
            generation,
            request,
        } = pending;

        if generation != self.generation {
            self.record(ListEvent::StaleResponseDiscarded {
                generation,
                latest: self.generation,
            });

            return Ok(ApplyOutcome::Stale {
                generation,
                latest: self.generation,
            });
        }

        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                self.record(ListEvent::FetchFailed { generation });
                return Err(err.into());
            }
        };

        let rows = self.apply(&request, page);
        self.record(ListEvent::ResponseApplied {
            generation,
            mode: request.mode,
            rows: u64::try_from(rows).unwrap_or(u64::MAX),
        });

        Ok(ApplyOutcome::Applied { rows })
    }

    /// Begin `request`, await the collaborator, and apply its result.
    pub async fn dispatch<F: Fetcher>(
        &mut self,
        fetcher: &F,
        request: FetchRequest,
    ) -> Result<ApplyOutcome, ListError> {
        let pending = self.begin(request);
        let result = fetcher.fetch(pending.request()).await;

        self.complete(pending, result)
    }

    // Merge one page into items and meta, keeping group context in step with
    // the request's intent.
    fn apply(&mut self, request: &FetchRequest, page: ListPage) -> usize {
        let ListPage { items, meta } = page;
        let alike_name = meta.alike.as_ref().and_then(|alike| alike.group_name.clone());
        let mut next = meta.resolve(request);

        next.group = match &request.intent {
            FetchIntent::OpenGroup {
                group_id,
                group_name,
            } => Some(GroupStateManager::enter(
                &self.meta,
                *group_id,
                alike_name.or_else(|| group_name.clone()),
            )),
            FetchIntent::CloseGroup => None,
            FetchIntent::Navigate | FetchIntent::ScrollAppend | FetchIntent::Reorder => {
                self.meta.group.take()
            }
        };

        let rows = items.len();
        match request.mode {
            FetchMode::Replace => self.items = items,
            FetchMode::Append => self.items.extend(items),
        }
        self.meta = next;

        rows
    }

    // ---------------------------------------------------------------------
    // UI-facing shortcuts
    // ---------------------------------------------------------------------

    /// Scroll handler: begin an append fetch if the geometry calls for one
    /// and no fetch is in flight.
    pub fn on_scroll(&mut self, geometry: &ScrollGeometry) -> Result<Option<PendingFetch>, ListError> {
        let request = self.controller.request_scroll_append(
            &self.meta,
            self.items.len(),
            geometry,
            self.loading,
        )?;

        Ok(request.map(|request| self.begin(request)))
    }

    /// Entity card handler: begin the group fetch for a group
    /// representative, or return `None` when the UI should navigate to the
    /// entity's detail view instead.
    pub fn on_activate(&mut self, entity: &Entity) -> Result<Option<PendingFetch>, ListError> {
        match self.controller.activate(entity, &self.meta)? {
            crate::group::Activation::OpenGroup(request) => Ok(Some(self.begin(request))),
            crate::group::Activation::NavigateToDetail { .. } => Ok(None),
        }
    }

    /// Begin the fetch that collapses the open group.
    pub fn on_close_group(&mut self) -> Result<PendingFetch, ListError> {
        let request = self.controller.close_group(&self.meta)?;

        Ok(self.begin(request))
    }

    /// Begin the fetch for 1-based page `page`.
    pub fn on_page(&mut self, page: u32) -> Result<PendingFetch, ListError> {
        let request = self.controller.request_page_number(&self.meta, page)?;

        Ok(self.begin(request))
    }
}
