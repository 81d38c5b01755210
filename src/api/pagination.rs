//! Listing pagination

use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::IntoParams;

/// Query string of the listing route.
///
/// `page` stays raw text so a malformed value can be answered with the not-found view
/// instead of an extractor rejection. An empty `page=` counts as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Page number, starting at 1
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<String>,
}

/// Parse a 1-indexed page number; a missing value means the first page.
///
/// Returns `None` for anything that is not a positive integer.
pub fn parse_page(raw: Option<&str>) -> Option<usize> {
    match raw.map(str::trim) {
        None | Some("") => Some(1),
        Some(text) => text.parse::<usize>().ok().filter(|page| *page >= 1),
    }
}

/// Records `[(page - 1) * per_page, page * per_page)` of `items`, clamped to its length
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_is_first_page() {
        assert_eq!(parse_page(None), Some(1));
        assert_eq!(parse_page(Some("")), Some(1));
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        assert_eq!(parse_page(Some("abc")), None);
        assert_eq!(parse_page(Some("0")), None);
        assert_eq!(parse_page(Some("-2")), None);
        assert_eq!(parse_page(Some("1.5")), None);
        assert_eq!(parse_page(Some("3")), Some(3));
    }

    #[test]
    fn twenty_five_records_over_ten_per_page() {
        let records: Vec<usize> = (0..25).collect();
        assert_eq!(page_slice(&records, 1, 10), &records[0..10]);
        assert_eq!(page_slice(&records, 2, 10), &records[10..20]);
        assert_eq!(page_slice(&records, 3, 10), &records[20..25]);
        assert!(page_slice(&records, 4, 10).is_empty());
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let records = [1, 2, 3];
        assert!(page_slice(&records, usize::MAX, 10).is_empty());
    }
}
