//! Local and remote item collections.
//!
//! The combined collection is local items (newest first, by construction)
//! followed by remote items in arrival order. No ordering is promised on that
//! concatenation; display order is imposed by [`crate::view::project`].
//!
//! Every mutation bumps [`ItemStore::revision`]. Readers remember the revision
//! they last projected and recompute on the next read when it has moved.

use crate::domain::item::check_text;
use crate::domain::{Item, ItemId, Result};

/// Holder of locally authored and remotely fetched items.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    /// Items created in this session, most recent first.
    local: Vec<Item>,

    /// Items delivered by the paginated source, in page order.
    remote: Vec<Item>,

    /// Incremented on every mutation.
    revision: u64,
}

impl ItemStore {
    /// Creates an empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a local item from user text and prepends it.
    ///
    /// `seq` is approximated as `(remote_total or 0) + local count + 1`. It is
    /// not a global sequence and can collide with remote numbering once local
    /// adds and pagination interleave.
    ///
    /// # Parameters
    ///
    /// * `text` - Raw draft text, trimmed before storing
    /// * `remote_total` - Server-reported total, if a page has arrived yet
    /// * `now_ms` - Creation timestamp in Unix milliseconds
    ///
    /// # Errors
    ///
    /// Returns [`ListboardError::Validation`](crate::domain::ListboardError::Validation)
    /// if the trimmed text is empty or too short. The store is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use listboard::store::ItemStore;
    ///
    /// let mut store = ItemStore::new();
    /// let item = store.add_local("  buy milk ", Some(200), 1_000).unwrap();
    /// assert_eq!(item.text, "buy milk");
    /// assert_eq!(item.seq, 201);
    /// assert!(store.add_local("no", None, 1_001).is_err());
    /// ```
    pub fn add_local(&mut self, text: &str, remote_total: Option<usize>, now_ms: i64) -> Result<Item> {
        let text = check_text(text)?;

        let base = remote_total.unwrap_or(0) + self.local.len();
        let item = Item {
            id: ItemId::random(),
            text: text.to_string(),
            created_at: now_ms,
            seq: u64::try_from(base).unwrap_or(u64::MAX).saturating_add(1),
        };

        tracing::debug!(id = %item.id, seq = item.seq, "local item added");
        self.local.insert(0, item.clone());
        self.touch();
        Ok(item)
    }

    /// Removes the item with `id` from whichever collection holds it.
    ///
    /// Absent ids are ignored, so removing twice is the same as removing once.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.len();
        self.local.retain(|item| &item.id != id);
        self.remote.retain(|item| &item.id != id);

        let removed = self.len() != before;
        if removed {
            tracing::debug!(id = %id, "item removed");
            self.touch();
        }
        removed
    }

    /// Merges a fetched page into the remote collection.
    ///
    /// The first page (offset 0) replaces the collection; later pages append.
    /// Overlapping ranges re-delivered by the backend are not deduplicated.
    pub fn replace_remote_page(&mut self, items: Vec<Item>, is_first_page: bool) {
        tracing::trace!(count = items.len(), is_first_page, "merging remote page");
        if is_first_page {
            self.remote = items;
        } else {
            self.remote.extend(items);
        }
        self.touch();
    }

    /// Empties the remote collection.
    pub fn clear_remote(&mut self) {
        self.remote.clear();
        self.touch();
    }

    /// Snapshot of local items followed by remote items.
    #[must_use]
    pub fn combined(&self) -> Vec<Item> {
        self.local.iter().chain(&self.remote).cloned().collect()
    }

    /// Items authored in this session, most recent first.
    #[must_use]
    pub fn local(&self) -> &[Item] {
        &self.local
    }

    /// Items fetched so far, in page order.
    #[must_use]
    pub fn remote(&self) -> &[Item] {
        &self.remote
    }

    /// Total number of known items, local plus remote.
    #[must_use]
    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks whether either collection holds `id`.
    ///
    /// # Parameters
    ///
    /// * `id` - Local UUID or remote `mock-{seq}` identifier
    ///
    /// # Returns
    ///
    /// `true` if the item is present, `false` after it was removed or before
    /// its page arrived.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.local.iter().chain(&self.remote).any(|item| &item.id == id)
    }

    /// Whether `id` belongs to an item created in this session.
    ///
    /// Used by the renderer to color local badges differently.
    #[must_use]
    pub fn is_local(&self, id: &ItemId) -> bool {
        self.local.iter().any(|item| &item.id == id)
    }

    /// Change counter; differs after any mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ListboardError, ValidationError};

    fn remote_item(seq: u64) -> Item {
        Item {
            id: ItemId::remote(format!("mock-{seq}")),
            text: format!("Mock item #{seq}"),
            created_at: i64::try_from(seq).unwrap() * 60_000,
            seq,
        }
    }

    #[test]
    fn add_local_prepends_and_numbers_from_known_total() {
        let mut store = ItemStore::new();
        let first = store.add_local("first", None, 10).unwrap();
        let second = store.add_local("second", None, 20).unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert_eq!(store.local()[0].id, second.id);

        let third = store.add_local("third", Some(200), 30).unwrap();
        assert_eq!(third.seq, 203);
    }

    #[test]
    fn add_local_rejects_blank_and_short_text() {
        let mut store = ItemStore::new();
        let revision = store.revision();

        assert!(matches!(
            store.add_local("   ", None, 0),
            Err(ListboardError::Validation(ValidationError::Empty))
        ));
        assert!(matches!(
            store.add_local(" ab ", None, 0),
            Err(ListboardError::Validation(ValidationError::TooShort { min: 3 }))
        ));
        assert!(store.is_empty());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn remove_is_idempotent_across_collections() {
        let mut store = ItemStore::new();
        let local = store.add_local("local one", None, 1).unwrap();
        store.replace_remote_page(vec![remote_item(1), remote_item(2)], true);

        assert!(store.remove(&ItemId::remote("mock-2")));
        assert!(store.remove(&local.id));
        let snapshot = store.combined();
        let revision = store.revision();

        assert!(!store.remove(&ItemId::remote("mock-2")));
        assert!(!store.remove(&local.id));
        assert_eq!(store.combined(), snapshot);
        assert_eq!(store.revision(), revision);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn first_page_replaces_later_pages_append() {
        let mut store = ItemStore::new();
        store.replace_remote_page(vec![remote_item(1)], true);
        store.replace_remote_page(vec![remote_item(2), remote_item(3)], false);
        let seqs: Vec<u64> = store.remote().iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);

        store.replace_remote_page(vec![remote_item(9)], true);
        assert_eq!(store.remote().len(), 1);
        assert_eq!(store.remote()[0].seq, 9);
    }

    #[test]
    fn combined_is_local_then_remote() {
        let mut store = ItemStore::new();
        store.replace_remote_page(vec![remote_item(5)], true);
        let local = store.add_local("mine", Some(1), 99).unwrap();

        let combined = store.combined();
        assert_eq!(combined[0].id, local.id);
        assert_eq!(combined[1].seq, 5);
        assert!(store.is_local(&local.id));
        assert!(!store.is_local(&ItemId::remote("mock-5")));
        assert!(store.contains(&ItemId::remote("mock-5")));
    }

    #[test]
    fn clear_remote_keeps_local_items() {
        let mut store = ItemStore::new();
        store.add_local("keep me", None, 1).unwrap();
        store.replace_remote_page(vec![remote_item(1)], true);
        store.clear_remote();
        assert_eq!(store.len(), 1);
        assert!(store.remote().is_empty());
    }
}
