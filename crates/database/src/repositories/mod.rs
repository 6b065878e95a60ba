pub mod blog;
pub mod lifecycle;
pub mod messages;
pub mod offers;
pub mod sessions;

/// OFFSET for a 1-based page. Saturates so an absurd page number
/// yields an empty page instead of overflowing.
pub(crate) fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 25), 50);
    }

    #[test]
    fn test_page_offset_saturates_instead_of_overflowing() {
        assert_eq!(page_offset(i64::MAX, 100), i64::MAX);
        assert!(page_offset(i64::MAX, i64::MAX) >= 0);
    }
}
