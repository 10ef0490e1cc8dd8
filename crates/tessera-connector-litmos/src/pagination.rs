//! Offset-cursor pagination codec for the Litmos API.
//!
//! Litmos paginates with `limit`/`start` query parameters and returns no
//! continuation token of its own, so the client tracks offsets itself. Both
//! operations here are stateless: the next cursor is reproducible from the
//! prior cursor and the number of items returned, which keeps every list
//! call replayable under the caller-driven retry model.

use tessera_connector::pagination::PageToken;

/// Derive the pagination query parameters for a page fetch.
///
/// Always sets `limit`. A cursor that parses as a non-negative integer is
/// sent as the `start` offset; an empty or malformed cursor omits `start`,
/// silently restarting from the first page rather than failing.
pub fn page_query(token: &PageToken, page_size: usize) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", page_size.to_string())];
    if let Some(start) = token.offset() {
        query.push(("start", start.to_string()));
    }
    query
}

/// Compute the cursor for the page after this one.
///
/// Returns the empty token (no more pages) when the call was unpaginated
/// (`token` is `None`), when the page came back short of `page_size`, or
/// when the prior cursor was malformed. Otherwise the next cursor is the
/// prior offset (empty cursor reads as 0) plus the number of items just
/// returned.
pub fn next_page_token(token: Option<&PageToken>, num_items: usize, page_size: usize) -> PageToken {
    let Some(token) = token else {
        return PageToken::start();
    };

    if num_items < page_size {
        // no more pages
        return PageToken::start();
    }

    if token.is_empty() {
        return PageToken::new(num_items.to_string());
    }

    match token.offset() {
        Some(start) => PageToken::new((start + num_items as u64).to_string()),
        None => PageToken::start(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_SIZE: usize = 100;

    #[test]
    fn test_query_always_sets_limit() {
        let query = page_query(&PageToken::start(), PAGE_SIZE);
        assert_eq!(query, vec![("limit", "100".to_string())]);
    }

    #[test]
    fn test_query_sets_start_for_numeric_cursor() {
        let query = page_query(&PageToken::new("250"), PAGE_SIZE);
        assert_eq!(
            query,
            vec![("limit", "100".to_string()), ("start", "250".to_string())]
        );
    }

    #[test]
    fn test_query_omits_start_for_malformed_cursor() {
        for cursor in ["abc", "-5", "1e3"] {
            let query = page_query(&PageToken::new(cursor), PAGE_SIZE);
            assert_eq!(query, vec![("limit", "100".to_string())], "cursor {cursor:?}");
        }
    }

    #[test]
    fn test_next_token_empty_for_unpaginated_call() {
        assert!(next_page_token(None, PAGE_SIZE, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_next_token_empty_for_short_page() {
        let token = PageToken::new("100");
        assert!(next_page_token(Some(&token), 40, PAGE_SIZE).is_empty());
        assert!(next_page_token(Some(&PageToken::start()), 0, PAGE_SIZE).is_empty());
        assert!(next_page_token(Some(&token), PAGE_SIZE - 1, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_next_token_advances_by_items_returned() {
        let first = next_page_token(Some(&PageToken::start()), PAGE_SIZE, PAGE_SIZE);
        assert_eq!(first.as_str(), "100");

        let second = next_page_token(Some(&first), PAGE_SIZE, PAGE_SIZE);
        assert_eq!(second.as_str(), "200");
    }

    #[test]
    fn test_next_token_empty_for_malformed_cursor() {
        let token = PageToken::new("abc");
        assert!(next_page_token(Some(&token), PAGE_SIZE, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_offset_arithmetic_over_cursor_range() {
        // next = cursor + n whenever n == page size, else empty
        for start in [0u64, 100, 250, 1000] {
            let token = PageToken::new(start.to_string());
            let next = next_page_token(Some(&token), PAGE_SIZE, PAGE_SIZE);
            assert_eq!(next.offset(), Some(start + PAGE_SIZE as u64));

            let done = next_page_token(Some(&token), PAGE_SIZE - 1, PAGE_SIZE);
            assert!(done.is_empty());
        }
    }
}
