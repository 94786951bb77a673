use log::trace;

use crate::error::PlaylistError;
use crate::item::Item;
use crate::media::Media;
use crate::playlist::Playlist;

impl<M: Media + 'static> Playlist<M> {
    fn find_real_index(&self, item: &Item<M>, index_hint: Option<usize>) -> Option<usize> {
        if let Some(hint) = index_hint {
            if hint < self.items.len() && self.items[hint].id() == item.id() {
                // the caller's view was still fresh
                return Some(hint);
            }
        }
        self.index_of(item)
    }

    /// Resolves a batch of items to their current indices, skipping any
    /// that are no longer present (concurrently removed). The hint for
    /// item `i+1` is `1 + the resolved index of item i`, since a UI
    /// collaborator issuing a batch request typically observed them as
    /// contiguous.
    fn find_indices(&self, items: &[Item<M>], mut index_hint: Option<usize>) -> Vec<usize> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            if let Some(real_index) = self.find_real_index(item, index_hint) {
                out.push(real_index);
                index_hint = Some(real_index + 1);
            }
        }
        out
    }

    fn remove_by_slices(&mut self, sorted_indices: &[usize]) {
        let count = sorted_indices.len();
        debug_assert!(count > 0);
        let mut last_index = sorted_indices[count - 1];
        let mut slice_size = 1usize;
        for i in (1..count).rev() {
            let index = sorted_indices[i - 1];
            if index + 1 == last_index {
                slice_size += 1;
            } else {
                self.remove(last_index, slice_size);
                slice_size = 1;
            }
            last_index = index;
        }
        self.remove(last_index, slice_size);
    }

    /// Moves everything named by `indices[0..head_index]` into one
    /// contiguous block abutting the slice that starts at `indices[head_index]`,
    /// updating `indices` in place as each partial move shifts the others,
    /// and returns where the unified block now starts.
    fn regroup(&mut self, indices: &mut [usize], head_index: usize) -> usize {
        let mut head = indices[head_index];
        if head_index == 0 {
            return head;
        }

        let mut slice_size = 1usize;
        let mut last_index = indices[head_index - 1];

        for i in (1..head_index).rev() {
            let mut index = indices[i - 1];
            if index + 1 == last_index {
                slice_size += 1;
            } else {
                debug_assert_ne!(last_index, head);
                if last_index < head {
                    debug_assert!(head >= slice_size);
                    head -= slice_size;
                    for slot in indices.iter_mut().take(i + 1) {
                        if *slot >= last_index + slice_size && *slot < head {
                            *slot -= slice_size;
                        }
                    }
                } else {
                    for slot in indices.iter_mut().take(i + 1) {
                        if *slot >= head && *slot < last_index {
                            *slot += slice_size;
                        }
                    }
                }
                index = indices[i - 1];
                self.move_items(last_index, slice_size, head);
                slice_size = 1;
            }
            last_index = index;
        }

        if last_index < head {
            debug_assert!(head >= slice_size);
            head -= slice_size;
        }
        self.move_items(last_index, slice_size, head);
        head
    }

    fn move_by_slices(&mut self, indices: &mut [usize], target: usize) {
        let count = indices.len();
        debug_assert!(count > 0);
        let mut i = count - 1;
        while i != 0 {
            if indices[i - 1] + 1 != indices[i] {
                break;
            }
            i -= 1;
        }
        let head = self.regroup(indices, i);
        if head != target {
            self.move_items(head, count, target);
        }
    }

    /// Tolerates a stale `index`: clamps it to the current bounds instead
    /// of failing.
    pub fn request_insert(&mut self, index: usize, media: &[std::sync::Arc<M>]) {
        let index = index.min(self.items.len());
        // insertion at a clamped, in-bounds index cannot fail on range.
        self.insert(index, media).expect("clamped index is always in range");
    }

    /// Locates each of `items` (consulting `index_hint` as a one-shot
    /// cache) and moves them, as a contiguous block preserving their
    /// relative order, so the block starts at `target`. Items no longer
    /// present are silently dropped from the batch. `target` is clamped to
    /// the current end using the post-locate size; this is the documented
    /// behavior even when the clamp disagrees with what the caller likely
    /// intended, because there is no way to recover that intent once items
    /// were concurrently removed.
    pub fn request_move(&mut self, items: &[Item<M>], mut target: usize, index_hint: Option<usize>) {
        let mut indices = self.find_indices(items, index_hint);
        if indices.is_empty() {
            return;
        }
        let size = self.items.len();
        let move_count = indices.len();
        debug_assert!(size >= move_count);
        if target + move_count > size {
            target = size - move_count;
        }
        self.move_by_slices(&mut indices, target);
        trace!("playlist: request_move resolved {move_count} item(s) to {target}");
    }

    /// Locates each of `items` and removes them, regardless of input
    /// order. Items no longer present are silently dropped.
    pub fn request_remove(&mut self, items: &[Item<M>], index_hint: Option<usize>) {
        let mut indices = self.find_indices(items, index_hint);
        if indices.is_empty() {
            return;
        }
        indices.sort_unstable();
        self.remove_by_slices(&indices);
    }

    /// Locates `item` (or goes to "none" if it is `None` or no longer
    /// present) and moves the cursor there.
    pub fn request_go_to(
        &mut self,
        item: Option<&Item<M>>,
        index_hint: Option<usize>,
    ) -> Result<(), PlaylistError> {
        let real_index = item.and_then(|it| self.find_real_index(it, index_hint));
        self.go_to(real_index)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{medias, new_playlist_default};

    #[test]
    fn request_insert_clamps_a_stale_index() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B"])).unwrap();

        pl.request_insert(99, &medias(&["C"]));

        assert_eq!(pl.count(), 3);
        assert_eq!(pl.get(2).media().title, "C");
    }

    #[test]
    fn request_remove_locates_stale_items_and_drops_missing_ones() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B", "C", "D"])).unwrap();
        let b = pl.get(1);
        let d = pl.get(3);

        // remove B and D out of order; nothing else was concurrently removed.
        pl.request_remove(&[d.clone(), b.clone()], None);

        assert_eq!(pl.count(), 2);
        let titles: Vec<_> = (0..pl.count()).map(|i| pl.get(i).media().title.clone()).collect();
        assert_eq!(titles, vec!["A", "C"]);

        // requesting removal of an item already gone is silently ignored.
        pl.request_remove(&[b], None);
        assert_eq!(pl.count(), 2);
    }

    #[test]
    fn request_move_preserves_input_order_as_a_contiguous_block() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1", "2", "3", "4", "5"])).unwrap();
        let items: Vec<_> = [4usize, 1].iter().map(|&i| pl.get(i)).collect();

        pl.request_move(&items, 0, None);

        let titles: Vec<_> = (0..pl.count()).map(|i| pl.get(i).media().title.clone()).collect();
        assert_eq!(titles, vec!["4", "1", "0", "2", "3", "5"]);
    }

    #[test]
    fn request_move_clamps_target_to_the_end() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["0", "1", "2"])).unwrap();
        let items = vec![pl.get(0)];

        pl.request_move(&items, 10, None);

        assert_eq!(pl.get(2).media().title, "0");
    }

    #[test]
    fn request_go_to_uses_the_hint_when_still_fresh() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B", "C"])).unwrap();
        let b = pl.get(1);

        pl.request_go_to(Some(&b), Some(1)).unwrap();

        assert_eq!(pl.get_current_index(), Some(1));
    }

    #[test]
    fn request_go_to_falls_back_to_a_scan_when_the_hint_is_stale() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A", "B", "C"])).unwrap();
        let c = pl.get(2);

        // caller thought C was still at index 0.
        pl.request_go_to(Some(&c), Some(0)).unwrap();

        assert_eq!(pl.get_current_index(), Some(2));
    }

    #[test]
    fn request_go_to_none_clears_the_cursor() {
        let (handle, _player) = new_playlist_default();
        let mut pl = handle.lock();
        pl.append(&medias(&["A"])).unwrap();
        pl.go_to(Some(0)).unwrap();

        pl.request_go_to(None, None).unwrap();

        assert_eq!(pl.get_current_index(), None);
    }
}
