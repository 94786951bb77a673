use std::sync::Arc;

use crate::media::Media;
use crate::value::ItemId;

/// A stable handle pairing an id with a media reference.
///
/// Cloning an `Item` is cheap (it clones the `Arc`); the id never changes
/// once an item has been inserted, and two items may legitimately wrap the
/// same `media` (e.g. the same track added twice to a playlist).
#[derive(Debug, Clone)]
pub struct Item<M: Media> {
    id: ItemId,
    media: Arc<M>,
}

impl<M: Media> Item<M> {
    pub(crate) fn new(id: ItemId, media: Arc<M>) -> Self {
        Self { id, media }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn media(&self) -> &Arc<M> {
        &self.media
    }

    pub(crate) fn is_media(&self, media: &Arc<M>) -> bool {
        Arc::ptr_eq(&self.media, media)
    }
}

impl<M: Media> PartialEq for Item<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Monotonic id generator scoped to a single playlist instance. Ids are
/// never reused, even across removals.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub(crate) fn next(&mut self) -> ItemId {
        let id = self.next;
        self.next += 1;
        ItemId::from(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{medias, new_playlist_default};

    #[test]
    fn ids_are_never_reused_after_removal() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();
        let a_id = pl.get(0).id();
        pl.remove(0, 1);
        pl.append(&medias(&["C"])).unwrap();

        assert_ne!(pl.get(0).id(), a_id);
    }

    #[test]
    fn two_items_may_share_the_same_media() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        let same = crate::test_support::media("dup");
        pl.append(&[same.clone(), same]).unwrap();

        assert_ne!(pl.get(0).id(), pl.get(1).id());
        assert!(pl.get(0).is_media(pl.get(1).media()));
    }
}
