use crate::window::PageWindow;

///
/// PageItem
///
/// One control of the pagination bar, in render order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageItem {
    Previous { enabled: bool },
    Page { number: u32, current: bool },
    Ellipsis,
    Next { enabled: bool },
}

impl PageItem {
    /// Page this control navigates to, given the current page.
    #[must_use]
    pub const fn target_page(self, current_page: u32) -> Option<u32> {
        match self {
            Self::Previous { enabled: true } => Some(current_page.saturating_sub(1)),
            Self::Next { enabled: true } => Some(current_page.saturating_add(1)),
            Self::Page {
                number,
                current: false,
            } => Some(number),
            _ => None,
        }
    }
}

impl PageWindow {
    /// Render-ordered controls for this window.
    ///
    /// With `hide_page_numbers` only the previous/next controls remain.
    /// A suppressed window renders nothing.
    #[must_use]
    pub fn items(&self, hide_page_numbers: bool) -> Vec<PageItem> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut items = vec![PageItem::Previous {
            enabled: self.has_previous,
        }];

        if !hide_page_numbers {
            let page = |number: u32| PageItem::Page {
                number,
                current: number == self.current_page,
            };

            if self.leading_ellipsis {
                items.extend(self.outside_leading.iter().copied().map(page));
                items.push(PageItem::Ellipsis);
            }

            items.extend(self.page_numbers.iter().copied().map(page));

            if self.trailing_ellipsis {
                items.push(PageItem::Ellipsis);
                items.extend(self.outside_trailing.iter().copied().map(page));
            }
        }

        items.push(PageItem::Next {
            enabled: self.has_next,
        });

        items
    }
}
