use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::PlaylistError;
use crate::media::Media;
use crate::playlist::Playlist;

/// A playlist instance shared with its player, exactly as described in the
/// concurrency notes: both sides hold a reference to the same mutex, so
/// neither can deadlock re-entering the other while it is held.
pub type PlaylistHandle<M> = Arc<Mutex<Playlist<M>>>;

/// The non-owning counterpart, handed to the player and preparser
/// collaborators so they can call back into the playlist without the
/// playlist itself holding a strong reference to them (breaking what would
/// otherwise be a reference cycle).
pub type PlaylistWeakHandle<M> = Weak<Mutex<Playlist<M>>>;

/// The external, non-goal collaborator that actually decodes and renders
/// media. The engine only ever pushes two requests at it and receives
/// notifications back through the `on_*` methods on [`Playlist`] (see
/// `player_bridge`).
pub trait Player<M: Media>: Send {
    /// Asks the player to start playing `media` (or to stop, if `None`).
    fn set_current_media(&self, media: Option<Arc<M>>) -> Result<(), PlaylistError>;

    /// Tells the player that whatever it cached for "the next item" is
    /// stale and it must call back into [`Playlist::get_next_media`] again
    /// the next time it needs it (e.g. at end of stream).
    fn invalidate_next_media(&self);

    fn start(&self) -> Result<(), PlaylistError> {
        Ok(())
    }

    fn stop(&self) {}

    fn pause(&self) {}

    fn resume(&self) {}
}

/// Constructs the player collaborator once the playlist's shared handle
/// exists, so the player implementation can store a weak back-reference to
/// call into `on_current_media_changed` and friends.
pub type PlayerFactory<M> = Box<dyn FnOnce(PlaylistWeakHandle<M>) -> Box<dyn Player<M>>>;
