//! End-to-end catalog flow against an in-memory list endpoint.

use futures::executor::block_on;
use martview::{
    core::error::FetchError,
    error::{ErrorKind, GroupErrorKind},
    prelude::*,
};
use serde_json::{Value, json};
use std::cell::RefCell;

const MART: DataMartId = DataMartId::new(3);
const FIXTURE: &str = include_str!("fixtures/incidents_page.json");

///
/// Endpoint
///
/// Serves `count` entities over the list wire format. Every seventh entity is
/// a group representative of three members.
///

struct Endpoint {
    count: u32,
    queries: RefCell<Vec<String>>,
}

impl Endpoint {
    const GROUP_SIZE: u32 = 3;

    const fn new(count: u32) -> Self {
        Self {
            count,
            queries: RefCell::new(Vec::new()),
        }
    }

    fn last_query(&self) -> String {
        self.queries.borrow().last().cloned().unwrap_or_default()
    }

    fn body(&self, request: &FetchRequest) -> Value {
        let offset = request.offset();

        if let Some(group) = request.options.alike() {
            let items = (0..Self::GROUP_SIZE)
                .map(|i| json!({ "id": group.get() * 1000 + u64::from(i), "entity_name": "member" }))
                .collect::<Vec<_>>();

            return json!({
                "items": items,
                "meta": {
                    "limit": request.limit,
                    "offset": offset,
                    "count": Self::GROUP_SIZE,
                    "data_mart": { "id": request.mart_id.get() },
                    "alike": { "id": group.get(), "group_name": format!("cluster {group}") },
                },
            });
        }

        let end = offset.saturating_add(request.limit).min(self.count);
        let items = (offset..end)
            .map(|id| {
                if id % 7 == 0 {
                    json!({
                        "id": id,
                        "entity_name": format!("incident {id}"),
                        "extra": { "group_size": Self::GROUP_SIZE, "group_name": format!("cluster {id}") },
                    })
                } else {
                    json!({ "id": id, "entity_name": format!("incident {id}") })
                }
            })
            .collect::<Vec<_>>();

        json!({
            "objects": items,
            "meta": {
                "limit": request.limit,
                "offset": offset,
                "count": self.count,
                "subj_ids": request.subj_ids,
                "data_mart": { "id": request.mart_id.get() },
                "alike": null,
            },
        })
    }
}

impl Fetcher for Endpoint {
    async fn fetch(&self, request: &FetchRequest) -> Result<ListPage, FetchError> {
        self.queries.borrow_mut().push(request.query_string());

        let bytes = serde_json::to_vec(&self.body(request))
            .map_err(|err| FetchError::with_source("encode failed", err))?;

        ListPage::from_json(&bytes).map_err(|err| FetchError::with_source("decode failed", err))
    }
}

fn incidents_session() -> ListSession {
    let config = CatalogConfig::from_toml_str("[scroll]\nlookahead_viewports = 2.0\n")
        .expect("config parses");

    martview::session(
        &config,
        ListMeta::new(MART, 10).with_subjects([EntityId::new(8)]),
    )
    .expect("config is valid")
}

fn load_first_page(session: &mut ListSession, endpoint: &Endpoint) {
    let request = session.controller().request_page(session.meta(), 0);
    block_on(session.dispatch(endpoint, request)).expect("first page loads");
}

#[test]
fn fixture_page_decodes() {
    let page = ListPage::from_json_str(FIXTURE).expect("fixture decodes");

    assert_eq!(page.items.len(), 3);
    assert!(!page.items[0].is_group());
    assert_eq!(page.items[1].title(), Some("Burst mains"));
    assert_eq!(page.items[2].title(), Some("Meter fault"));
    assert_eq!(page.meta.count, Some(47));
}

#[test]
fn first_load_shows_leading_band() {
    let endpoint = Endpoint::new(1000);
    let mut session = incidents_session();

    load_first_page(&mut session, &endpoint);

    assert_eq!(endpoint.last_query(), "offset=0&limit=10&subj_ids=8");
    assert_eq!(session.items().len(), 10);

    let window = session.window();
    assert_eq!(window.page_numbers, (1..=8).collect::<Vec<_>>());
    assert_eq!(window.outside_trailing, vec![99, 100]);
    assert!(window.trailing_ellipsis);

    let items = session.page_items();
    assert_eq!(items.first(), Some(&PageItem::Previous { enabled: false }));
    assert_eq!(items.last(), Some(&PageItem::Next { enabled: true }));
}

#[test]
fn page_click_replaces_items() {
    let endpoint = Endpoint::new(1000);
    let mut session = incidents_session();
    load_first_page(&mut session, &endpoint);

    let pending = session.on_page(46).expect("page 46 exists");
    assert_eq!(pending.request().query_string(), "offset=450&limit=10&subj_ids=8");

    let result = block_on(endpoint.fetch(pending.request()));
    session.complete(pending, result).expect("page 46 applies");

    assert_eq!(session.items().len(), 10);
    assert_eq!(session.items()[0].id, EntityId::new(450));
    assert_eq!(session.window().page_numbers, vec![44, 45, 46, 47, 48]);
}

#[test]
fn scrolling_appends_until_exhausted() {
    let endpoint = Endpoint::new(25);
    let mut session = incidents_session();
    load_first_page(&mut session, &endpoint);

    let near_end = ScrollGeometry::new(900.0, 200.0, 1200.0);
    while let Some(pending) = session.on_scroll(&near_end).expect("meta is well formed") {
        assert_eq!(pending.request().mode, FetchMode::Append);

        let result = block_on(endpoint.fetch(pending.request()));
        session.complete(pending, result).expect("append applies");
    }

    assert_eq!(session.items().len(), 25);
    assert_eq!(endpoint.queries.borrow().len(), 3);
    assert!(!session.is_loading());
}

#[test]
fn group_expands_and_restores() {
    let endpoint = Endpoint::new(1000);
    let mut session = incidents_session();
    load_first_page(&mut session, &endpoint);
    let before = session.meta().clone();

    let group = session
        .items()
        .iter()
        .find(|entity| entity.is_group() && entity.id.get() > 0)
        .cloned()
        .expect("first page holds a group");
    assert_eq!(group.id, EntityId::new(7));

    let pending = session
        .on_activate(&group)
        .expect("closed list can open a group")
        .expect("group representative opens");
    let result = block_on(endpoint.fetch(pending.request()));
    session.complete(pending, result).expect("group applies");

    assert_eq!(endpoint.last_query(), "offset=0&limit=10&subj_ids=8&alike=7");
    assert_eq!(session.group_name(), Some("cluster 7"));
    assert_eq!(session.items().len(), 3);
    assert!(session.window().is_empty());

    let err = Error::from(
        session
            .on_activate(&group)
            .expect_err("group is already open"),
    );
    assert_eq!(err.kind, ErrorKind::Group(GroupErrorKind::InvalidStateTransition));

    let pending = session.on_close_group().expect("open group closes");
    let result = block_on(endpoint.fetch(pending.request()));
    session.complete(pending, result).expect("close applies");

    let after = session.meta();
    assert_eq!(session.group_name(), None);
    assert_eq!(after.request_options.alike(), None);
    assert_eq!(after.subj_ids, before.subj_ids);
    assert_eq!((after.offset, after.count), (0, before.count));
    assert_eq!(session.items().len(), 10);
}

#[test]
fn plain_entity_navigates_to_detail() {
    let endpoint = Endpoint::new(1000);
    let mut session = incidents_session();
    load_first_page(&mut session, &endpoint);

    let plain = session.items()[1].clone();
    let activation = session
        .controller()
        .activate(&plain, session.meta())
        .expect("plain entities never fail");

    assert_eq!(activation, Activation::NavigateToDetail { id: plain.id });
}

#[test]
fn invalid_config_is_rejected() {
    let config = CatalogConfig::from_toml_str("[scroll]\nlookahead_viewports = -1.0\n");

    let err = Error::from(config.expect_err("negative lookahead is rejected"));
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}
