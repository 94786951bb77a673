//! Domain layer: the playlist aggregate, its navigation state machine and
//! the randomizer that backs shuffled playback.
//!
//! Every public method on [`Playlist`] assumes the caller already holds the
//! lock wrapping it (`PlaylistHandle<M>` = `Arc<Mutex<Playlist<M>>>`); there
//! is no internal locking here, by design (see the crate's concurrency
//! notes in `playlist.rs`).

mod config;
mod content;
mod control;
mod error;
mod item;
mod listener;
mod media;
mod player;
mod player_bridge;
mod playlist;
mod preparse;
mod randomizer;
mod request;
mod shuffle;
mod sort;
mod value;

#[cfg(test)]
mod test_support;

pub use config::{
    PlaybackOrder, PlaybackRepeat, PlayerState, PlaylistConfig, PreparseMode, SortCriterion,
    SortDirection, SortKey, StoppedAction,
};
pub use error::PlaylistError;
pub use item::Item;
pub use listener::PlaylistListener;
pub use media::Media;
pub use player::{Player, PlayerFactory, PlaylistHandle, PlaylistWeakHandle};
pub use playlist::{Playlist, PlaylistView};
pub use preparse::{MediaNode, PreparseOutcome, Preparser};
pub use value::{ItemId, ListenerId};
