use thiserror::Error;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// Slice of the ordered question set that a page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub total_pages: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Invalid page number")]
    Invalid,
    #[error("No questions found")]
    Empty,
    #[error("Page number out of range")]
    OutOfRange,
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

pub fn page_window(page: i64, total: i64, per_page: i64) -> Result<PageWindow, PageError> {
    if page < 1 {
        return Err(PageError::Invalid);
    }
    if total <= 0 {
        return Err(PageError::Empty);
    }
    let total_pages = total_pages(total, per_page);
    if page > total_pages {
        return Err(PageError::OutOfRange);
    }
    Ok(PageWindow {
        page,
        total_pages,
        offset: (page - 1) * per_page,
        limit: per_page,
    })
}
