// Pagination cursor for the repository listing.

/// Current page and whether more pages may exist (`None` = unknown yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub page: u32,
    pub has_more: Option<bool>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: None,
        }
    }
}

impl Cursor {
    /// Cursor after receiving `returned` rows for `page`.
    ///
    /// A full page means more rows may exist. This is a heuristic: a listing
    /// whose size is an exact multiple of the page size reports one extra
    /// page that comes back empty.
    pub fn after_page(page: u32, returned: usize, page_size: u32) -> Self {
        Self {
            page,
            has_more: Some(returned == page_size as usize),
        }
    }

    /// Terminal cursor, nothing more to load.
    pub fn exhausted() -> Self {
        Self {
            page: 1,
            has_more: Some(false),
        }
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more == Some(true)
    }

    pub fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}
