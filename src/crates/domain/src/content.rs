use std::sync::Arc;

use log::{debug, trace};

use crate::config::PlaybackOrder;
use crate::error::PlaylistError;
use crate::item::Item;
use crate::media::Media;
use crate::playlist::Playlist;

impl<M: Media + 'static> Playlist<M> {
    fn new_items(&mut self, media: &[Arc<M>]) -> Vec<Item<M>> {
        media
            .iter()
            .map(|m| Item::new(self.id_gen.next(), Arc::clone(m)))
            .collect()
    }

    fn items_reset(&mut self) {
        if self.order == PlaybackOrder::Random {
            self.randomizer.clear();
        }

        let saved = self.save_state();
        self.current = None;
        self.refresh_has_prev_next();

        crate::listener::notify_items_reset(&mut self.listeners, &self.items);
        self.notify_state_changes(saved);
    }

    fn items_inserted(&mut self, index: usize, count: usize) {
        if self.order == PlaybackOrder::Random {
            self.randomizer.add(&self.items[index..index + count]);
        }

        let saved = self.save_state();
        if let Some(current) = self.current {
            if current >= index {
                self.current = Some(current + count);
            }
        }
        self.refresh_has_prev_next();

        let items = self.items[index..index + count].to_vec();
        crate::listener::notify_items_added(&mut self.listeners, index, &items);
        self.notify_state_changes(saved);
    }

    fn items_moved(&mut self, index: usize, count: usize, target: usize) {
        let saved = self.save_state();
        if let Some(current) = self.current {
            if index < target {
                if current >= index && current < index + count {
                    self.current = Some(current + (target - index));
                } else if current >= index + count && current < target + count {
                    self.current = Some(current - count);
                }
            } else if current >= index && current < index + count {
                self.current = Some(current - (index - target));
            } else if current >= target && current < index {
                self.current = Some(current + count);
            }
        }
        self.refresh_has_prev_next();

        crate::listener::notify_items_moved(&mut self.listeners, index, count, target);
        self.notify_state_changes(saved);
    }

    /// Drops the items from the randomizer first, while the indices it was
    /// given still describe the pre-removal layout.
    fn items_removing(&mut self, index: usize, count: usize) {
        if self.order == PlaybackOrder::Random {
            self.randomizer.remove(&self.items[index..index + count]);
        }
    }

    /// Returns whether the currently-playing media was among the removed
    /// items (and so the player must be told to load whatever took its
    /// place, rather than merely invalidating the cached next item).
    fn items_removed(&mut self, index: usize, count: usize) -> bool {
        let saved = self.save_state();
        let mut current_media_changed = false;
        if let Some(current) = self.current {
            if current >= index && current < index + count {
                // the current item was itself removed; `self.items` has
                // already been shrunk by the caller, so `index < len`
                // tells us whether there is a successor to fall onto.
                self.current = if index < self.items.len() {
                    Some(index)
                } else {
                    None
                };
                current_media_changed = true;
            } else if current >= index + count {
                self.current = Some(current - count);
            }
        }
        self.refresh_has_prev_next();

        crate::listener::notify_items_removed(&mut self.listeners, index, count);
        self.notify_state_changes(saved);
        current_media_changed
    }

    fn item_replaced(&mut self, index: usize) {
        let saved = self.save_state();
        self.refresh_has_prev_next();

        let items = [self.items[index].clone()];
        crate::listener::notify_items_updated(&mut self.listeners, index, &items);
        self.notify_state_changes(saved);
    }

    fn auto_preparse_one(&self, media: &Arc<M>) {
        if self.preparse_mode == crate::config::PreparseMode::Disabled {
            return;
        }
        if media.is_preparsed() {
            return;
        }
        if let Some(preparser) = &self.preparser {
            trace!("playlist: dispatching preparse request");
            preparser.request(self.weak_handle(), Arc::clone(media));
        }
    }

    /// Inserts `media` as new items starting at `index`, preserving input
    /// order. `index` must be `<= count()`.
    pub fn insert(&mut self, index: usize, media: &[Arc<M>]) -> Result<(), PlaylistError> {
        if index > self.items.len() {
            return Err(PlaylistError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let items = self.new_items(media);
        let count = items.len();
        self.items.splice(index..index, items);

        self.items_inserted(index, count);
        for m in media {
            self.auto_preparse_one(m);
        }
        self.player.invalidate_next_media();
        debug!("playlist: inserted {count} item(s) at index {index}");
        Ok(())
    }

    pub fn append(&mut self, media: &[Arc<M>]) -> Result<(), PlaylistError> {
        let index = self.items.len();
        self.insert(index, media)
    }

    /// Moves the `count` items starting at `index` so they begin at
    /// `target`. Preconditions: `index + count <= N` and `target + count <=
    /// N`. Named `move_items` because `move` is a reserved keyword.
    pub fn move_items(&mut self, index: usize, count: usize, target: usize) {
        debug_assert!(index + count <= self.items.len());
        debug_assert!(target + count <= self.items.len());
        if count == 0 || index == target {
            return;
        }

        let slice: Vec<Item<M>> = self.items.splice(index..index + count, []).collect();
        self.items.splice(target..target, slice);

        self.items_moved(index, count, target);
        self.player.invalidate_next_media();
        debug!("playlist: moved {count} item(s) from {index} to {target}");
    }

    /// Removes the `count` items starting at `index`.
    pub fn remove(&mut self, index: usize, count: usize) {
        debug_assert!(index + count <= self.items.len());
        if count == 0 {
            return;
        }

        self.items_removing(index, count);
        self.items.drain(index..index + count);

        let current_media_changed = self.items_removed(index, count);
        if current_media_changed {
            let current = self.current;
            let _ = self.set_current_media_checked(current);
        } else {
            self.player.invalidate_next_media();
        }
        debug!("playlist: removed {count} item(s) at index {index}");
    }

    pub(crate) fn set_current_media_checked(
        &self,
        index: Option<usize>,
    ) -> Result<(), PlaylistError> {
        let media = index.map(|i| Arc::clone(self.items[i].media()));
        self.player.set_current_media(media)
    }

    fn replace_one(&mut self, index: usize, media: &Arc<M>) {
        let item = Item::new(self.id_gen.next(), Arc::clone(media));
        if self.order == PlaybackOrder::Random {
            self.randomizer.remove(std::slice::from_ref(&self.items[index]));
            self.randomizer.add(std::slice::from_ref(&item));
        }
        self.items[index] = item;
        self.item_replaced(index);
    }

    /// Swaps the item at `index` for a new item wrapping `media`, under a
    /// fresh id.
    pub fn replace(&mut self, index: usize, media: Arc<M>) -> Result<(), PlaylistError> {
        if index >= self.items.len() {
            return Err(PlaylistError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.replace_one(index, &media);
        self.auto_preparse_one(&media);
        Ok(())
    }

    /// Atomic replace-and-insert: replaces the item at `index` with
    /// `media[0]`, then inserts `media[1..]` right after. An empty `media`
    /// degrades to a plain removal of the single item at `index`.
    pub fn expand(&mut self, index: usize, media: &[Arc<M>]) -> Result<(), PlaylistError> {
        if index >= self.items.len() {
            return Err(PlaylistError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        if media.is_empty() {
            self.remove(index, 1);
            return Ok(());
        }

        self.replace_one(index, &media[0]);
        self.auto_preparse_one(&media[0]);

        if media.len() > 1 {
            let tail = &media[1..];
            let items = self.new_items(tail);
            let count = items.len();
            self.items.splice(index + 1..index + 1, items);
            self.items_inserted(index + 1, count);
            for m in tail {
                self.auto_preparse_one(m);
            }
        }

        if self.current == Some(index) {
            self.set_current_media_checked(self.current)?;
        } else {
            self.player.invalidate_next_media();
        }
        Ok(())
    }

    /// Empties the playlist and resets navigation state.
    pub fn clear(&mut self) {
        let _ = self.player.set_current_media(None);
        self.items.clear();
        self.items_reset();
        debug!("playlist: cleared");
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PlaylistConfig;
    use crate::test_support::{
        medias, new_playlist_default, new_playlist_with_preparser, PlayerCall, TestMedia,
    };
    use std::sync::Arc;

    #[test]
    fn append_then_index() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B", "C", "D", "E"])).unwrap();

        assert_eq!(pl.count(), 5);
        assert_eq!(pl.get(3).media().title, "D");
        assert_eq!(pl.get_current_index(), None);
        assert!(!pl.has_prev());
        assert!(pl.has_next());
    }

    #[test]
    fn insert_shifts_current_forward() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1", "2", "3", "4"])).unwrap();
        pl.go_to(Some(0)).unwrap();

        pl.insert(0, &medias(&["X", "Y", "Z", "W"])).unwrap();

        assert_eq!(pl.get_current_index(), Some(4));
        assert_eq!(pl.get(4).media().title, "0");
        assert!(pl.has_prev());
    }

    #[test]
    fn move_across_current_follows_the_item() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        let titles: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let media: Vec<_> = titles.iter().map(|t| Arc::new(TestMedia::new(t.clone()))).collect();
        pl.append(&media).unwrap();
        pl.go_to(Some(3)).unwrap();

        pl.move_items(1, 3, 5);

        let order: Vec<_> = (0..pl.count()).map(|i| pl.get(i).media().title.clone()).collect();
        assert_eq!(order, vec!["0", "4", "5", "6", "7", "1", "2", "3", "8", "9"]);
        assert_eq!(pl.get_current_index(), Some(7));
    }

    #[test]
    fn remove_including_current_falls_onto_successor() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1", "2", "3", "4"])).unwrap();
        pl.go_to(Some(2)).unwrap();

        pl.remove(1, 2);

        assert_eq!(pl.count(), 3);
        assert_eq!(pl.get_current_index(), Some(1));
        assert_eq!(pl.get(1).media().title, "3");
        assert!(matches!(
            player.last_call(),
            Some(PlayerCall::SetCurrentMedia(Some(ref t))) if t == "3"
        ));
    }

    #[test]
    fn remove_current_with_no_successor_clears_current() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1"])).unwrap();
        pl.go_to(Some(1)).unwrap();

        pl.remove(1, 1);

        assert_eq!(pl.get_current_index(), None);
        assert!(matches!(player.last_call(), Some(PlayerCall::SetCurrentMedia(None))));
    }

    #[test]
    fn remove_after_current_only_decrements() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1", "2", "3"])).unwrap();
        pl.go_to(Some(1)).unwrap();

        pl.remove(2, 2);

        assert_eq!(pl.get_current_index(), Some(1));
        // current media didn't change, so only next-media was invalidated.
        assert_eq!(player.last_call(), Some(PlayerCall::InvalidateNextMedia));
    }

    #[test]
    fn replace_assigns_a_fresh_id_and_notifies_update() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();
        let old_id = pl.get(0).id();

        pl.replace(0, Arc::new(TestMedia::new("A2"))).unwrap();

        assert_eq!(pl.get(0).media().title, "A2");
        assert_ne!(pl.get(0).id(), old_id);
        assert_eq!(pl.count(), 2);
    }

    #[test]
    fn expand_replaces_and_inserts_tail() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();
        pl.go_to(Some(0)).unwrap();

        pl.expand(0, &medias(&["A1", "A2", "A3"])).unwrap();

        assert_eq!(pl.count(), 4);
        let titles: Vec<_> = (0..pl.count()).map(|i| pl.get(i).media().title.clone()).collect();
        assert_eq!(titles, vec!["A1", "A2", "A3", "B"]);
        // the current index was expanded in place, so the player must reload it.
        assert!(matches!(
            player.last_call(),
            Some(PlayerCall::SetCurrentMedia(Some(ref t))) if t == "A1"
        ));
    }

    #[test]
    fn expand_of_non_current_item_only_invalidates_next() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();
        pl.go_to(Some(0)).unwrap();

        pl.expand(1, &medias(&["B1", "B2"])).unwrap();

        assert_eq!(player.last_call(), Some(PlayerCall::InvalidateNextMedia));
    }

    #[test]
    fn clear_empties_and_tells_player_to_stop() {
        let (handle, player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();
        pl.go_to(Some(0)).unwrap();

        pl.clear();

        assert_eq!(pl.count(), 0);
        assert_eq!(pl.get_current_index(), None);
        assert!(matches!(player.last_call(), Some(PlayerCall::SetCurrentMedia(None))));
    }

    #[test]
    fn insert_out_of_range_is_rejected() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        let err = pl.insert(5, &medias(&["A"])).unwrap_err();
        assert!(matches!(err, crate::error::PlaylistError::OutOfRange { index: 5, len: 0 }));
    }

    #[test]
    fn insert_dispatches_auto_preparse_for_unparsed_media() {
        let config = PlaylistConfig {
            preparse_mode: crate::config::PreparseMode::Enabled,
            ..PlaylistConfig::default()
        };
        let (handle, _player, preparser) = new_playlist_with_preparser(config);
        let mut pl = handle.lock();

        pl.insert(0, &[Arc::new(TestMedia::unparsed("fresh"))]).unwrap();

        assert_eq!(preparser.requested_titles(), vec!["fresh".to_string()]);
    }

    #[test]
    fn insert_skips_preparse_for_already_parsed_media() {
        let config = PlaylistConfig {
            preparse_mode: crate::config::PreparseMode::Enabled,
            ..PlaylistConfig::default()
        };
        let (handle, _player, preparser) = new_playlist_with_preparser(config);
        let mut pl = handle.lock();

        pl.insert(0, &medias(&["already-done"])).unwrap();

        assert!(preparser.requested_titles().is_empty());
    }
}
