//! Filter and sort projection.
//!
//! [`project`] is a pure function of the combined item collection and the
//! current [`ViewSettings`]. It never reorders or mutates the store; it works
//! on a copy and is cheap enough at this scale to rerun on every change.

use crate::domain::{Item, SortMode};
use std::cmp::Reverse;

/// Presentation-only state. Never written into the item model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSettings {
    /// Free-form filter text; trimmed before matching.
    pub filter_text: String,

    /// Display order by `created_at`.
    pub sort_mode: SortMode,
}

/// Case-insensitive substring match of the trimmed `query` against `item.text`.
///
/// An empty (or whitespace-only) query matches everything.
#[must_use]
pub fn matches_filter(item: &Item, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || item.text.to_lowercase().contains(&query.to_lowercase())
}

/// Filters and stable-sorts `items` for display.
///
/// Items with equal `created_at` keep their relative input order in both sort
/// directions.
///
/// # Examples
///
/// ```
/// use listboard::domain::{Item, ItemId, SortMode};
/// use listboard::view::{project, ViewSettings};
///
/// let items = vec![
///     Item { id: ItemId::remote("a"), text: "Apple".into(), created_at: 1, seq: 1 },
///     Item { id: ItemId::remote("b"), text: "Banana".into(), created_at: 2, seq: 2 },
/// ];
/// let settings = ViewSettings { filter_text: " app".into(), sort_mode: SortMode::Newest };
/// let visible = project(&items, &settings);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].text, "Apple");
/// ```
#[must_use]
pub fn project(items: &[Item], settings: &ViewSettings) -> Vec<Item> {
    let query = settings.filter_text.trim().to_lowercase();

    let mut visible: Vec<Item> = items
        .iter()
        .filter(|item| query.is_empty() || item.text.to_lowercase().contains(&query))
        .cloned()
        .collect();

    // sort_by_key is stable
    match settings.sort_mode {
        SortMode::Newest => visible.sort_by_key(|item| Reverse(item.created_at)),
        SortMode::Oldest => visible.sort_by_key(|item| item.created_at),
    }

    visible
}

/// Character range `(start, end)` of the first case-insensitive match of the
/// trimmed `query` in `text`, for highlighting.
///
/// Returns `None` for an empty query or when no match aligns with character
/// boundaries of `text`.
#[must_use]
pub fn highlight_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();
    for start in 0..chars.len() {
        let mut lowered = String::new();
        for (offset, c) in chars[start..].iter().enumerate() {
            lowered.extend(c.to_lowercase());
            if lowered.len() >= needle.len() {
                if lowered == needle {
                    return Some((start, start + offset + 1));
                }
                break;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use proptest::prelude::*;

    fn item(id: &str, text: &str, created_at: i64) -> Item {
        Item {
            id: ItemId::remote(id),
            text: text.to_string(),
            created_at,
            seq: 0,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_returns_everything() {
        let items = vec![item("a", "one", 1), item("b", "two", 2)];
        let settings = ViewSettings { filter_text: "   ".into(), sort_mode: SortMode::Oldest };
        assert_eq!(ids(&project(&items, &settings)), vec!["a", "b"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_trimmed() {
        let items = vec![item("a", "Mock item #12", 1), item("b", "groceries", 2)];
        let settings = ViewSettings { filter_text: "  MOCK ".into(), sort_mode: SortMode::Newest };
        assert_eq!(ids(&project(&items, &settings)), vec!["a"]);
    }

    #[test]
    fn sorts_by_created_at_in_both_directions() {
        let items = vec![item("mid", "x", 5), item("old", "x", 1), item("new", "x", 9)];
        let newest = ViewSettings { filter_text: String::new(), sort_mode: SortMode::Newest };
        let oldest = ViewSettings { filter_text: String::new(), sort_mode: SortMode::Oldest };
        assert_eq!(ids(&project(&items, &newest)), vec!["new", "mid", "old"]);
        assert_eq!(ids(&project(&items, &oldest)), vec!["old", "mid", "new"]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let items = vec![item("a", "x", 3), item("b", "x", 3), item("c", "x", 1), item("d", "x", 3)];
        let newest = ViewSettings { filter_text: String::new(), sort_mode: SortMode::Newest };
        let oldest = ViewSettings { filter_text: String::new(), sort_mode: SortMode::Oldest };
        assert_eq!(ids(&project(&items, &newest)), vec!["a", "b", "d", "c"]);
        assert_eq!(ids(&project(&items, &oldest)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn projection_leaves_input_untouched() {
        let items = vec![item("old", "x", 1), item("new", "x", 9)];
        let snapshot = items.clone();
        let _ = project(&items, &ViewSettings::default());
        assert_eq!(items, snapshot);
    }

    #[test]
    fn highlight_range_uses_character_indices() {
        assert_eq!(highlight_range("Mock item #12", "ITEM"), Some((5, 9)));
        assert_eq!(highlight_range("café latte", "LAT"), Some((5, 8)));
        assert_eq!(highlight_range("abc", ""), None);
        assert_eq!(highlight_range("abc", "zz"), None);
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_the_matching_items(
            texts in proptest::collection::vec("[a-zA-Z #0-9]{1,12}", 0..20),
            query in "[a-zA-Z ]{0,4}",
        ) {
            let items: Vec<Item> = texts
                .iter()
                .enumerate()
                .map(|(i, t)| item(&format!("id-{i}"), t, i64::try_from(i).unwrap()))
                .collect();
            let settings = ViewSettings { filter_text: query.clone(), sort_mode: SortMode::Oldest };
            let visible = project(&items, &settings);

            let needle = query.trim().to_lowercase();
            let expected: Vec<&Item> = items
                .iter()
                .filter(|i| i.text.to_lowercase().contains(&needle))
                .collect();
            prop_assert_eq!(visible.len(), expected.len());
            for (got, want) in visible.iter().zip(expected) {
                prop_assert_eq!(got, want);
                prop_assert!(matches_filter(got, &query));
            }
        }
    }
}
