//! Pure paging math for list-style pages.

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return start/end indices of the zero-based `page`.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_mul(safe_per_page).min(total_items);
    let end = (start + safe_per_page).min(total_items);
    (start, end)
}

/// Group lines into bullet-list page bodies of at most `per_page` lines each.
pub fn bulleted_pages(items: &[String], per_page: usize) -> Vec<String> {
    (0..total_pages(items.len(), per_page))
        .map(|page| {
            let (start, end) = page_window(items.len(), per_page, page);
            format!("- {}", items[start..end].join("\n- "))
        })
        .collect()
}

/// Parse a one-based page argument into a zero-based index.
///
/// A missing argument means the first page; `0` and garbage are rejected.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|page| page.checked_sub(1)),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_cover_every_item_once() {
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(page_window(11, 5, 0), (0, 5));
        assert_eq!(page_window(11, 5, 2), (10, 11));
        assert_eq!(page_window(11, 5, 9), (11, 11));
    }

    #[test]
    fn bulleted_pages_split_lines() {
        let items: Vec<String> = ["a", "b", "c"].into_iter().map(ToOwned::to_owned).collect();
        assert_eq!(bulleted_pages(&items, 2), vec!["- a\n- b", "- c"]);
        assert!(bulleted_pages(&[], 2).is_empty());
    }

    #[test]
    fn one_based_pages() {
        assert_eq!(parse_one_based_page(None), Some(0));
        assert_eq!(parse_one_based_page(Some("3")), Some(2));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("x")), None);
    }
}
