use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::{PlaybackOrder, PlaybackRepeat, PlaylistConfig, StoppedAction};
use crate::item::{IdGenerator, Item};
use crate::listener::{ListenerRegistry, PlaylistListener};
use crate::media::Media;
use crate::player::{Player, PlayerFactory, PlaylistHandle, PlaylistWeakHandle};
use crate::preparse::Preparser;
use crate::randomizer::Randomizer;
use crate::value::{ItemId, ListenerId};

/// The playlist aggregate: an ordered, mutable sequence of [`Item`]s plus
/// the navigation state machine that drives playback through them.
///
/// Every field below is protected by the single coarse lock wrapping this
/// struct (`PlaylistHandle<M>` = `Arc<Mutex<Playlist<M>>>`), shared with the
/// player collaborator. Public operations in `content`, `control`,
/// `request`, `player_bridge`, `preparse`, `shuffle` and `sort` all assume
/// the caller already holds that lock (they are plain `&mut self` methods,
/// so the borrow checker enforces this for free — there is no separate
/// "assert locked" debug check to write in Rust).
pub struct Playlist<M: Media> {
    pub(crate) self_handle: PlaylistWeakHandle<M>,
    pub(crate) player: Box<dyn Player<M>>,
    pub(crate) preparser: Option<Box<dyn Preparser<M>>>,
    pub(crate) preparse_mode: crate::config::PreparseMode,
    pub(crate) preparse_threads: usize,
    pub(crate) preparse_timeout: Duration,

    pub(crate) items: Vec<Item<M>>,
    pub(crate) id_gen: IdGenerator,

    pub(crate) current: Option<usize>,
    pub(crate) has_prev: bool,
    pub(crate) has_next: bool,
    pub(crate) repeat: PlaybackRepeat,
    pub(crate) order: PlaybackOrder,
    pub(crate) stopped_action: StoppedAction,

    pub(crate) randomizer: Randomizer<M>,
    pub(crate) listeners: ListenerRegistry<M>,
}

impl<M: Media + 'static> Playlist<M> {
    /// Creates a new, empty playlist and its player collaborator in one
    /// step, mirroring `vlc_playlist_New(parent, preparse_mode,
    /// preparse_threads, preparse_timeout)`. `preparse_threads` and
    /// `preparse_timeout` are stored on the playlist itself and exposed via
    /// [`Self::preparse_threads`]/[`Self::preparse_timeout`], so an
    /// embedder's [`Preparser`] implementation can size its own worker pool
    /// the first time `request` re-locks the playlist through the weak
    /// handle it was handed — this crate does not run a thread pool itself.
    pub fn new(
        player_factory: PlayerFactory<M>,
        preparser: Option<Box<dyn Preparser<M>>>,
        config: PlaylistConfig,
    ) -> PlaylistHandle<M> {
        Arc::new_cyclic(|weak: &PlaylistWeakHandle<M>| {
            let player = player_factory(weak.clone());
            Mutex::new(Playlist {
                self_handle: weak.clone(),
                player,
                preparser,
                preparse_mode: config.preparse_mode,
                preparse_threads: config.preparse_threads,
                preparse_timeout: config.preparse_timeout,
                items: Vec::new(),
                id_gen: IdGenerator::default(),
                current: None,
                has_prev: false,
                has_next: false,
                repeat: PlaybackRepeat::None,
                order: PlaybackOrder::Normal,
                stopped_action: config.stopped_action,
                randomizer: Randomizer::new(),
                listeners: ListenerRegistry::new(),
            })
        })
    }

    pub(crate) fn weak_handle(&self) -> PlaylistWeakHandle<M> {
        self.self_handle.clone()
    }

    /// Snapshots the fields a mutator may change, to be diffed afterwards
    /// by [`Self::notify_state_changes`]. Every mutator in `content`,
    /// `control`, `shuffle` and `sort` follows this save-then-diff
    /// discipline rather than notifying unconditionally.
    pub(crate) fn save_state(&self) -> crate::listener::SavedState {
        crate::listener::SavedState {
            current: self.current,
            has_prev: self.has_prev,
            has_next: self.has_next,
        }
    }

    pub(crate) fn notify_state_changes(&mut self, saved: crate::listener::SavedState) {
        crate::listener::notify_state_changes(
            &mut self.listeners,
            saved,
            self.current,
            self.has_prev,
            self.has_next,
        );
    }

    /// Refreshes the cached `has_prev`/`has_next` fields from scratch.
    /// Called by every mutator after updating `current`, `items`, `repeat`,
    /// `order` or the randomizer, per the notification ordering contract.
    pub(crate) fn refresh_has_prev_next(&mut self) {
        self.has_prev = self.compute_has_prev();
        self.has_next = self.compute_has_next();
    }

    // -- queries --------------------------------------------------------

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Item<M> {
        self.items[index].clone()
    }

    pub fn index_of(&self, item: &Item<M>) -> Option<usize> {
        self.items.iter().position(|i| i.id() == item.id())
    }

    pub fn index_of_media(&self, media: &Arc<M>) -> Option<usize> {
        self.items.iter().position(|i| i.is_media(media))
    }

    pub fn index_of_id(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub fn get_current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn get_playback_repeat(&self) -> PlaybackRepeat {
        self.repeat
    }

    pub fn get_playback_order(&self) -> PlaybackOrder {
        self.order
    }

    pub fn get_player(&self) -> &dyn Player<M> {
        self.player.as_ref()
    }

    /// The worker-pool size an embedder's [`Preparser`] should use, as
    /// configured at construction. This crate never reads it itself.
    pub fn preparse_threads(&self) -> usize {
        self.preparse_threads
    }

    /// The per-request timeout an embedder's [`Preparser`] should enforce,
    /// as configured at construction. This crate never reads it itself.
    pub fn preparse_timeout(&self) -> Duration {
        self.preparse_timeout
    }

    // -- listeners --------------------------------------------------------

    /// Registers a listener. If `notify_current_state` is true, it
    /// immediately receives a synthetic burst of callbacks describing the
    /// playlist as it stands, so a newly-attached view doesn't need a
    /// separate bootstrap query round-trip.
    pub fn add_listener(
        &mut self,
        listener: Box<dyn PlaylistListener<M>>,
        notify_current_state: bool,
    ) -> ListenerId {
        let id = self.listeners.add(listener);
        if notify_current_state {
            crate::listener::notify_current_state(
                &mut self.listeners,
                id,
                &self.items,
                self.repeat,
                self.order,
                self.current,
                self.has_prev,
                self.has_next,
            );
        }
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl<M: Media> Drop for Playlist<M> {
    fn drop(&mut self) {
        debug_assert!(
            self.listeners.is_empty(),
            "playlist dropped with listeners still registered"
        );
    }
}

/// A read-only view exposed to collaborators that only ever need to walk
/// the current items (e.g. an external exporter to a playlist file
/// format) — a non-goal of this crate, but this is the seam such a
/// consumer would plug into, named `export(filename, format_id)` in the
/// public surface this engine is part of.
pub trait PlaylistView<M: Media> {
    fn count(&self) -> usize;
    fn get(&self, index: usize) -> Item<M>;
}

impl<M: Media> PlaylistView<M> for Playlist<M> {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Item<M> {
        self.items[index].clone()
    }
}
