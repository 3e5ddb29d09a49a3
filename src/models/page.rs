//! Page addressing for paginated queries.

use serde::Serialize;

use crate::error::AppError;

/// A 0-based page of a result set ordered by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    index: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a request for page `index` (0-based) holding `size` records.
    pub fn of(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// Translates a 1-based page number into a request.
    ///
    /// Fails with `InvalidPage` when either argument is below 1, or when the
    /// offset would not fit a signed 64-bit SQL parameter.
    pub fn from_page_number(page_number: u32, page_size: u32) -> Result<Self, AppError> {
        let invalid = AppError::InvalidPage {
            page_number,
            page_size,
        };
        if page_number < 1 || page_size < 1 {
            return Err(invalid);
        }

        let page = Self::of(page_number - 1, page_size);
        if page.offset() > i64::MAX as u64 {
            return Err(invalid);
        }
        Ok(page)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.index) * u64::from(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_page_number_is_zero_based() {
        let page = PageRequest::from_page_number(1, 1).unwrap();
        assert_eq!(page, PageRequest::of(0, 1));
        assert_eq!(page.offset(), 0);

        let page = PageRequest::from_page_number(3, 5).unwrap();
        assert_eq!(page.index(), 2);
        assert_eq!(page.size(), 5);
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn test_from_page_number_rejects_zero() {
        assert!(matches!(
            PageRequest::from_page_number(0, 5),
            Err(AppError::InvalidPage {
                page_number: 0,
                page_size: 5
            })
        ));
        assert!(matches!(
            PageRequest::from_page_number(1, 0),
            Err(AppError::InvalidPage { .. })
        ));
    }

    #[test]
    fn test_from_page_number_rejects_offset_overflow() {
        assert!(matches!(
            PageRequest::from_page_number(u32::MAX, u32::MAX),
            Err(AppError::InvalidPage { .. })
        ));

        // Huge page numbers with small pages stay valid
        let page = PageRequest::from_page_number(u32::MAX, 1).unwrap();
        assert_eq!(page.offset(), u64::from(u32::MAX - 1));
    }
}
