//! Module: window
//! Responsibility: Digg-style page windows derived from offset/limit/count.
//! Does not own: request construction or rendering.

mod items;


pub use items::PageItem;

use martview_config::PaginatorConfig;

///
/// WindowPolicy
///
/// Constants shaping the page window.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowPolicy {
    pub leading_displayed: u32,
    pub trailing_displayed: u32,
    pub leading_threshold: u32,
    pub trailing_threshold: u32,
    pub outside_range_size: u32,
    pub adjacent: u32,
}

impl WindowPolicy {
    pub const DIGG: Self = Self {
        leading_displayed: PaginatorConfig::DEFAULT_LEADING_DISPLAYED,
        trailing_displayed: PaginatorConfig::DEFAULT_TRAILING_DISPLAYED,
        leading_threshold: PaginatorConfig::DEFAULT_LEADING_THRESHOLD,
        trailing_threshold: PaginatorConfig::DEFAULT_TRAILING_THRESHOLD,
        outside_range_size: PaginatorConfig::DEFAULT_OUTSIDE_RANGE_SIZE,
        adjacent: PaginatorConfig::DEFAULT_ADJACENT,
    };

    // Largest page count shown in full without any ellipsis. Either edge
    // band plus its outside range must fit with a gap left over.
    const fn full_span(&self) -> u32 {
        let widest = if self.leading_displayed > self.trailing_displayed {
            self.leading_displayed
        } else {
            self.trailing_displayed
        };

        widest
            .saturating_add(self.outside_range_size)
            .saturating_add(1)
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::DIGG
    }
}

impl From<&PaginatorConfig> for WindowPolicy {
    fn from(config: &PaginatorConfig) -> Self {
        Self {
            leading_displayed: config.leading_displayed,
            trailing_displayed: config.trailing_displayed,
            leading_threshold: config.leading_threshold,
            trailing_threshold: config.trailing_threshold,
            outside_range_size: config.outside_range_size,
            adjacent: config.adjacent,
        }
    }
}

///
/// PageWindow
///
/// Page numbers and ellipsis markers for the pagination control.
///
/// `outside_leading` are the first pages, shown before the leading ellipsis.
/// `outside_trailing` are the last pages, shown after the trailing ellipsis.
/// An empty `page_numbers` means the control is suppressed.
///

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageWindow {
    pub page_numbers: Vec<u32>,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    pub outside_leading: Vec<u32>,
    pub outside_trailing: Vec<u32>,
    pub current_page: u32,
    pub num_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageWindow {
    const fn empty(current_page: u32, num_pages: u32) -> Self {
        Self {
            page_numbers: Vec::new(),
            leading_ellipsis: false,
            trailing_ellipsis: false,
            outside_leading: Vec::new(),
            outside_trailing: Vec::new(),
            current_page,
            num_pages,
            has_next: false,
            has_previous: false,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.page_numbers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.page_numbers.contains(&page)
    }
}

/// Compute the page window for one offset/limit/count triple.
///
/// Pure and deterministic. A zero `limit` or `count`, or fewer than two
/// pages, yields the empty window. An offset past the last page is treated
/// as the last page.
#[must_use]
pub fn compute_page_window(offset: u32, limit: u32, count: u32, policy: &WindowPolicy) -> PageWindow {
    if limit == 0 || count == 0 {
        return PageWindow::empty(1, 0);
    }

    let num_pages = count.div_ceil(limit);
    let current_page = (offset / limit).saturating_add(1).min(num_pages);

    if num_pages < 2 {
        return PageWindow::empty(current_page, num_pages);
    }

    let mut window = PageWindow {
        current_page,
        num_pages,
        has_next: current_page < num_pages,
        has_previous: current_page > 1,
        ..PageWindow::default()
    };

    if num_pages <= policy.full_span() {
        window.page_numbers = clipped(1, num_pages, num_pages);
    } else if current_page <= policy.leading_threshold {
        window.page_numbers = clipped(1, policy.leading_displayed, num_pages);
        window.outside_trailing = last_pages(num_pages, policy.outside_range_size);
        window.trailing_ellipsis = true;
    } else if current_page > num_pages.saturating_sub(policy.trailing_threshold) {
        let start = num_pages
            .saturating_sub(policy.trailing_displayed)
            .saturating_add(1);
        window.page_numbers = clipped(start, num_pages, num_pages);
        window.outside_leading = first_pages(num_pages, policy.outside_range_size);
        window.leading_ellipsis = true;
    } else {
        window.page_numbers = clipped(
            current_page.saturating_sub(policy.adjacent),
            current_page.saturating_add(policy.adjacent),
            num_pages,
        );
        window.outside_leading = first_pages(num_pages, policy.outside_range_size);
        window.outside_trailing = last_pages(num_pages, policy.outside_range_size);
        window.leading_ellipsis = true;
        window.trailing_ellipsis = true;
    }

    window
}

// Inclusive range `start..=end` clipped to `1..=num_pages`.
fn clipped(start: u32, end: u32, num_pages: u32) -> Vec<u32> {
    (start.max(1)..=end.min(num_pages)).collect()
}

fn first_pages(num_pages: u32, size: u32) -> Vec<u32> {
    clipped(1, size, num_pages)
}

fn last_pages(num_pages: u32, size: u32) -> Vec<u32> {
    if size == 0 {
        return Vec::new();
    }

    clipped(num_pages.saturating_sub(size).saturating_add(1), num_pages, num_pages)
}
