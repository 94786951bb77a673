use std::sync::Arc;

use log::{debug, trace};

use crate::config::{PlaybackOrder, PlaybackRepeat};
use crate::error::PlaylistError;
use crate::media::Media;
use crate::playlist::Playlist;

impl<M: Media> Playlist<M> {
    // -- normal order -----------------------------------------------------

    fn normal_has_prev(&self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if self.repeat == PlaybackRepeat::All {
            return !self.items.is_empty();
        }
        current > 0
    }

    fn normal_prev_index(&self) -> usize {
        let current = self.current.expect("normal_prev_index requires current");
        match self.repeat {
            PlaybackRepeat::None | PlaybackRepeat::One => current - 1,
            PlaybackRepeat::All => {
                if current == 0 {
                    self.items.len() - 1
                } else {
                    current - 1
                }
            }
        }
    }

    fn normal_has_next(&self) -> bool {
        if self.repeat == PlaybackRepeat::All {
            return !self.items.is_empty();
        }
        match self.current {
            Some(current) => current + 1 < self.items.len(),
            None => !self.items.is_empty(),
        }
    }

    fn normal_next_index(&self) -> usize {
        match self.repeat {
            PlaybackRepeat::None | PlaybackRepeat::One => {
                self.current.map(|c| c + 1).unwrap_or(0)
            }
            PlaybackRepeat::All => {
                let next = self.current.map(|c| c + 1).unwrap_or(0);
                next % self.items.len()
            }
        }
    }

    // -- random order -------------------------------------------------------

    fn random_has_prev(&self) -> bool {
        self.randomizer.has_prev()
    }

    fn random_prev_index(&self) -> usize {
        let prev = self.randomizer.peek_prev().expect("has_prev was true");
        self.index_of(prev).expect("randomizer item must be in the playlist")
    }

    fn random_has_next(&self) -> bool {
        if self.repeat == PlaybackRepeat::All {
            return !self.items.is_empty();
        }
        self.randomizer.has_next()
    }

    fn random_next_index(&self) -> usize {
        let next = self.randomizer.peek_next().expect("has_next was true");
        self.index_of(next).expect("randomizer item must be in the playlist")
    }

    fn get_prev_index(&self) -> usize {
        match self.order {
            PlaybackOrder::Normal => self.normal_prev_index(),
            PlaybackOrder::Random => self.random_prev_index(),
        }
    }

    fn get_next_index(&self) -> usize {
        match self.order {
            PlaybackOrder::Normal => self.normal_next_index(),
            PlaybackOrder::Random => self.random_next_index(),
        }
    }

    /// Recomputes `has_prev` from scratch (as opposed to [`Self::has_prev`],
    /// which returns the cached field). `prev`/`next` re-run this as their
    /// precondition check rather than trusting the cache, matching the
    /// original's behavior of calling `vlc_playlist_ComputeHasPrev` directly
    /// instead of reading `playlist->has_prev`.
    pub(crate) fn compute_has_prev(&self) -> bool {
        match self.order {
            PlaybackOrder::Normal => self.normal_has_prev(),
            PlaybackOrder::Random => self.random_has_prev(),
        }
    }

    pub(crate) fn compute_has_next(&self) -> bool {
        match self.order {
            PlaybackOrder::Normal => self.normal_has_next(),
            PlaybackOrder::Random => self.random_has_next(),
        }
    }

    fn set_current_index(&mut self, index: Option<usize>) {
        let saved = self.save_state();
        self.current = index;
        self.refresh_has_prev_next();
        self.notify_state_changes(saved);
    }

    fn set_current_media(&self, index: Option<usize>) -> Result<(), PlaylistError> {
        let media = index.map(|i| Arc::clone(self.items[i].media()));
        self.player.set_current_media(media)
    }

    /// Moves the cursor to the previous item per the current order/repeat
    /// mode. Returns `NoPrev` if `has_prev()` would be false.
    pub fn prev(&mut self) -> Result<(), PlaylistError> {
        if !self.compute_has_prev() {
            return Err(PlaylistError::NoPrev);
        }
        let index = self.get_prev_index();
        self.set_current_media(Some(index))?;

        if self.order == PlaybackOrder::Random {
            let selected = self.randomizer.prev();
            debug_assert_eq!(selected.as_ref().map(|i| i.id()), Some(self.items[index].id()));
        }

        self.set_current_index(Some(index));
        debug!("playlist: moved to previous item at index {index}");
        Ok(())
    }

    /// Moves the cursor to the next item per the current order/repeat mode.
    /// Returns `NoNext` if `has_next()` would be false.
    pub fn next(&mut self) -> Result<(), PlaylistError> {
        if !self.compute_has_next() {
            return Err(PlaylistError::NoNext);
        }
        let index = self.get_next_index();
        self.set_current_media(Some(index))?;

        if self.order == PlaybackOrder::Random {
            let selected = self.randomizer.next();
            debug_assert_eq!(selected.as_ref().map(|i| i.id()), Some(self.items[index].id()));
        }

        self.set_current_index(Some(index));
        debug!("playlist: moved to next item at index {index}");
        Ok(())
    }

    /// Jumps directly to `index` (or clears the cursor if `None`).
    pub fn go_to(&mut self, index: Option<usize>) -> Result<(), PlaylistError> {
        if let Some(i) = index {
            if i >= self.items.len() {
                return Err(PlaylistError::OutOfRange {
                    index: i,
                    len: self.items.len(),
                });
            }
        }
        self.set_current_media(index)?;

        if let (Some(i), PlaybackOrder::Random) = (index, self.order) {
            let item = self.items[i].clone();
            self.randomizer.select(&item);
        }

        self.set_current_index(index);
        Ok(())
    }

    fn get_next_media_index(&self) -> Option<usize> {
        if self.repeat == PlaybackRepeat::One {
            return self.current;
        }
        if !self.compute_has_next() {
            return None;
        }
        Some(self.get_next_index())
    }

    /// Called by the player bridge when a track ends, to learn what to load
    /// next without actually moving the cursor yet.
    pub fn get_next_media(&self) -> Option<Arc<M>> {
        let index = self.get_next_media_index()?;
        Some(Arc::clone(self.items[index].media()))
    }

    pub fn set_playback_repeat(&mut self, repeat: PlaybackRepeat) {
        if self.repeat == repeat {
            return;
        }
        self.repeat = repeat;
        if self.order == PlaybackOrder::Random {
            self.randomizer.set_loop(repeat == PlaybackRepeat::All);
        }

        let saved = self.save_state();
        self.refresh_has_prev_next();

        crate::listener::notify_playback_repeat_changed(&mut self.listeners, repeat);
        self.notify_state_changes(saved);
        trace!("playlist: playback repeat changed to {repeat:?}");
    }

    pub fn set_playback_order(&mut self, order: PlaybackOrder) {
        if self.order == order {
            return;
        }
        self.order = order;
        if order == PlaybackOrder::Random {
            debug_assert_eq!(self.randomizer.count(), 0);
            self.randomizer.add(&self.items);
            self.randomizer
                .set_loop(self.repeat == PlaybackRepeat::All);
        } else {
            self.randomizer.clear();
        }

        let saved = self.save_state();
        self.refresh_has_prev_next();

        crate::listener::notify_playback_order_changed(&mut self.listeners, order);
        self.notify_state_changes(saved);
        trace!("playlist: playback order changed to {order:?}");
    }
}
