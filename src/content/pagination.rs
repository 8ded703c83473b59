use crate::api::models::ListDetails;
use crate::api::PAGE_SIZE;

/// Pagination state derived from the last listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub total_pages: u32,
    pub current_page: u32,
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self {
            total_count: 0,
            has_next: false,
            has_previous: false,
            total_pages: 0,
            current_page: 1,
        }
    }
}

impl PaginationMeta {
    pub fn from_details(details: Option<&ListDetails>, current_page: u32) -> Self {
        let Some(details) = details else {
            return Self {
                current_page,
                ..Self::default()
            };
        };
        let total_pages = details.total_records.div_ceil(u64::from(PAGE_SIZE));
        Self {
            total_count: details.total_records,
            has_next: details.pages.next.exists(),
            has_previous: details.pages.previous.exists(),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            current_page,
        }
    }

    /// `1..=total_pages`, one entry per page button.
    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages).collect()
    }

    /// 1-based inclusive range of records on the current page, cut at the total.
    /// `None` when the page lies past the last record.
    pub fn record_range(&self) -> Option<(u64, u64)> {
        let size = u64::from(PAGE_SIZE);
        let page = u64::from(self.current_page.max(1));
        let start = (page - 1) * size + 1;
        (start <= self.total_count).then(|| (start, (page * size).min(self.total_count)))
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn first(&self) -> Option<u32> {
        self.can_go_back().then_some(1)
    }

    pub fn previous(&self) -> Option<u32> {
        self.can_go_back().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.can_go_forward().then(|| self.current_page + 1)
    }

    pub fn last(&self) -> Option<u32> {
        self.can_go_forward().then_some(self.total_pages)
    }
}
