use std::sync::Arc;

use log::debug;

use crate::config::{PlaybackOrder, PlayerState, StoppedAction};
use crate::media::Media;
use crate::playlist::Playlist;

impl<M: Media + 'static> Playlist<M> {
    /// The player and the playlist share one lock (see the crate's
    /// concurrency notes), so these `on_*` methods are plain `&mut self`
    /// calls the embedder's `Player` implementation makes after re-locking
    /// through its [`crate::player::PlaylistWeakHandle`] — there is no
    /// separate callback-registration step to model here.
    pub fn on_current_media_changed(&mut self, new_media: Option<Arc<M>>) {
        let current_media = self.current.map(|i| Arc::clone(self.items[i].media()));
        let same = match (&new_media, &current_media) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            // the player re-announced what we already knew was playing;
            // nothing moved, so only the cached next media might be stale.
            self.player.invalidate_next_media();
            return;
        }

        let index = new_media.as_ref().and_then(|m| self.index_of_media(m));
        if let (Some(i), PlaybackOrder::Random) = (index, self.order) {
            let item = self.items[i].clone();
            self.randomizer.select(&item);
        }

        let saved = self.save_state();
        self.current = index;
        self.refresh_has_prev_next();
        self.notify_state_changes(saved);

        self.player.invalidate_next_media();
    }

    pub fn on_player_state_changed(&mut self, state: PlayerState) {
        if state == PlayerState::Stopped && self.stopped_action == StoppedAction::Exit {
            // this crate is a library, not a process: surface the request
            // to the embedder instead of calling into process control.
            crate::listener::notify_shutdown_requested(&mut self.listeners);
        }
    }

    fn notify_media_updated(&mut self, media: &Arc<M>) {
        if self.listeners.is_empty() {
            return;
        }
        let index = match self.current {
            // the player typically reports events for the current item,
            // so this usually avoids a linear search.
            Some(current) if self.items[current].is_media(media) => Some(current),
            _ => self.index_of_media(media),
        };
        let Some(index) = index else {
            return;
        };
        let items = [self.items[index].clone()];
        crate::listener::notify_items_updated(&mut self.listeners, index, &items);
    }

    pub fn on_media_meta_changed(&mut self, media: &Arc<M>) {
        self.notify_media_updated(media);
    }

    pub fn on_media_length_changed(&mut self, current_media: &Arc<M>) {
        self.notify_media_updated(current_media);
    }

    pub fn start(&self) -> Result<(), crate::error::PlaylistError> {
        self.player.start()
    }

    pub fn stop(&self) {
        self.player.stop();
    }

    pub fn pause(&self) {
        self.player.pause();
    }

    pub fn resume(&self) {
        self.player.resume();
    }

    /// The player discovered subitems under the media it is currently
    /// playing (e.g. it turned out to be a playlist file); expand it in
    /// place, the same way a preparser-reported subtree is handled.
    pub fn on_media_subitems_changed(&mut self, node: &crate::preparse::MediaNode<M>) {
        let _ = self.expand_item_from_node(node);
    }

    pub fn set_media_stopped_action(&mut self, action: StoppedAction) {
        self.stopped_action = action;
        self.player.invalidate_next_media();
        crate::listener::notify_media_stopped_action_changed(&mut self.listeners, action);
        debug!("playlist: media stopped action set to {action:?}");
    }
}
