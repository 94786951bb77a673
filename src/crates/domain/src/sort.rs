use std::cmp::Ordering;

use crate::config::{SortCriterion, SortDirection, SortKey};
use crate::item::Item;
use crate::media::Media;
use crate::playlist::Playlist;

/// `SortKey::TrackId` sorts by the item's own id rather than anything on
/// `Media` — there is no "track id" field on the media descriptor itself,
/// and the playlist's assigned id is the closest stand-in the engine has.
fn compare<M: Media>(a: &Item<M>, b: &Item<M>, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.media().title().cmp(b.media().title()),
        SortKey::Artist => a.media().artist().cmp(b.media().artist()),
        SortKey::Album => a.media().album().cmp(b.media().album()),
        SortKey::Duration => a.media().duration().cmp(&b.media().duration()),
        SortKey::TrackNumber => a.media().track_number().cmp(&b.media().track_number()),
        SortKey::TrackId => a.id().as_u64().cmp(&b.id().as_u64()),
        SortKey::Url => a.media().url().cmp(b.media().url()),
        SortKey::Date => a.media().date().cmp(&b.media().date()),
    }
}

impl<M: Media + 'static> Playlist<M> {
    /// Stable multi-key sort over the content store; each criterion breaks
    /// ties left by the one before it. A no-op below two items or with an
    /// empty criteria list.
    ///
    /// Like [`Self::shuffle`], this physically reorders `items[]` rather
    /// than navigating through a lazily-maintained permutation (that is the
    /// randomizer's job, and is untouched by this operation); the current
    /// item, if any, is relocated to wherever it lands and reported through
    /// a single `items_reset` plus the usual state deltas.
    pub fn sort(&mut self, criteria: &[SortCriterion]) {
        if self.items.len() < 2 || criteria.is_empty() {
            return;
        }

        let current_id = self.current.map(|i| self.items[i].id());

        self.items.sort_by(|a, b| {
            for criterion in criteria {
                let ordering = compare(a, b, criterion.key);
                let ordering = match criterion.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        let saved = self.save_state();
        if let Some(id) = current_id {
            self.current = self.items.iter().position(|item| item.id() == id);
            self.refresh_has_prev_next();
        }

        crate::listener::notify_items_reset(&mut self.listeners, &self.items);
        self.notify_state_changes(saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SortDirection, SortKey};
    use crate::test_support::{new_playlist_default, TestMedia};
    use std::sync::Arc;

    fn media(title: &str, track_number: u32) -> Arc<TestMedia> {
        Arc::new(TestMedia {
            track_number: Some(track_number),
            ..TestMedia::new(title)
        })
    }

    #[test]
    fn sorts_by_single_key_ascending() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&[media("Charlie", 3), media("Alpha", 1), media("Bravo", 2)])
            .unwrap();

        pl.sort(&[SortCriterion::new(SortKey::Title, SortDirection::Ascending)]);

        let titles: Vec<_> = (0..pl.count()).map(|i| pl.get(i).media().title.clone()).collect();
        assert_eq!(titles, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn relocates_current_item_after_sort() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&[media("Charlie", 3), media("Alpha", 1), media("Bravo", 2)])
            .unwrap();
        pl.go_to(Some(0)).unwrap(); // Charlie

        pl.sort(&[SortCriterion::new(SortKey::TrackNumber, SortDirection::Ascending)]);

        assert_eq!(pl.get_current_index(), Some(2));
        assert_eq!(pl.get(2).media().title, "Charlie");
    }

    #[test]
    fn ties_broken_by_second_criterion() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        let a = Arc::new(TestMedia {
            artist: "Z".into(),
            ..TestMedia::new("Same")
        });
        let b = Arc::new(TestMedia {
            artist: "A".into(),
            ..TestMedia::new("Same")
        });
        pl.append(&[a, b]).unwrap();

        pl.sort(&[
            SortCriterion::new(SortKey::Title, SortDirection::Ascending),
            SortCriterion::new(SortKey::Artist, SortDirection::Ascending),
        ]);

        assert_eq!(pl.get(0).media().artist, "A");
        assert_eq!(pl.get(1).media().artist, "Z");
    }

    #[test]
    fn single_item_is_a_no_op() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&[media("Only", 1)]).unwrap();

        pl.sort(&[SortCriterion::new(SortKey::Title, SortDirection::Ascending)]);

        assert_eq!(pl.count(), 1);
    }
}
