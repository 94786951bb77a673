//! Test doubles shared by every module's `#[cfg(test)]` block: a minimal
//! [`Media`] implementation, and fake `Player`/`Preparser` collaborators
//! that record what the engine asked of them.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::config::PlaylistConfig;
use crate::error::PlaylistError;
use crate::item::Item;
use crate::media::Media;
use crate::player::{Player, PlayerFactory, PlaylistHandle, PlaylistWeakHandle};
use crate::playlist::Playlist;
use crate::preparse::Preparser;
use crate::value::ItemId;

#[derive(Debug, Default, Clone)]
pub struct TestMedia {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: Option<Duration>,
    pub track_number: Option<u32>,
    pub url: String,
    pub date: Option<NaiveDate>,
    pub preparsed: bool,
}

impl TestMedia {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            preparsed: true,
            ..Default::default()
        }
    }

    pub fn unparsed(title: impl Into<String>) -> Self {
        Self {
            preparsed: false,
            ..Self::new(title)
        }
    }
}

impl Media for TestMedia {
    fn title(&self) -> &str {
        &self.title
    }

    fn artist(&self) -> &str {
        &self.artist
    }

    fn album(&self) -> &str {
        &self.album
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn track_number(&self) -> Option<u32> {
        self.track_number
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn is_preparsed(&self) -> bool {
        self.preparsed
    }
}

pub fn media(title: &str) -> Arc<TestMedia> {
    Arc::new(TestMedia::new(title))
}

pub fn medias(titles: &[&str]) -> Vec<Arc<TestMedia>> {
    titles.iter().map(|t| media(t)).collect()
}

/// A bare item for randomizer tests that never touch a real playlist. `id`
/// doubles as the wrapped media's title, so assertions can read it straight
/// back off the returned `Item`.
pub fn item(id: u64) -> Item<TestMedia> {
    Item::new(ItemId::from(id), media(&id.to_string()))
}

/// Records every call the engine makes into the player collaborator, so
/// tests can assert on `set_current_media`/`invalidate_next_media` without
/// a real decoder behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    SetCurrentMedia(Option<String>),
    InvalidateNextMedia,
}

#[derive(Default)]
pub struct TestPlayer {
    calls: RefCell<Vec<PlayerCall>>,
    reject: bool,
}

impl TestPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<PlayerCall> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Option<PlayerCall> {
        self.calls.borrow().last().cloned()
    }
}

impl Player<TestMedia> for TestPlayer {
    fn set_current_media(&self, media: Option<Arc<TestMedia>>) -> Result<(), PlaylistError> {
        if self.reject {
            return Err(PlaylistError::Player("rejected by test player".into()));
        }
        self.calls
            .borrow_mut()
            .push(PlayerCall::SetCurrentMedia(media.map(|m| m.title.clone())));
        Ok(())
    }

    fn invalidate_next_media(&self) {
        self.calls.borrow_mut().push(PlayerCall::InvalidateNextMedia);
    }
}

// SAFETY-free impl: forwards through the shared `Arc` so the test keeps a
// handle to inspect calls after handing a boxed copy to the playlist.
impl Player<TestMedia> for Arc<TestPlayer> {
    fn set_current_media(&self, media: Option<Arc<TestMedia>>) -> Result<(), PlaylistError> {
        (**self).set_current_media(media)
    }

    fn invalidate_next_media(&self) {
        (**self).invalidate_next_media()
    }
}

#[derive(Default)]
pub struct TestPreparser {
    requests: RefCell<Vec<String>>,
}

impl TestPreparser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested_titles(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Preparser<TestMedia> for TestPreparser {
    fn request(&self, _handle: PlaylistWeakHandle<TestMedia>, media: Arc<TestMedia>) {
        self.requests.borrow_mut().push(media.title.clone());
    }
}

impl Preparser<TestMedia> for Arc<TestPreparser> {
    fn request(&self, handle: PlaylistWeakHandle<TestMedia>, media: Arc<TestMedia>) {
        (**self).request(handle, media)
    }
}

/// Builds a fresh playlist backed by a [`TestPlayer`], returning the shared
/// handle and an `Arc` to the player so tests can inspect its call log.
pub fn new_playlist(config: PlaylistConfig) -> (PlaylistHandle<TestMedia>, Arc<TestPlayer>) {
    let player = Arc::new(TestPlayer::new());
    let player_for_factory = player.clone();
    let factory: PlayerFactory<TestMedia> = Box::new(move |_weak| Box::new(player_for_factory));
    let handle = Playlist::new(factory, None, config);
    (handle, player)
}

pub fn new_playlist_default() -> (PlaylistHandle<TestMedia>, Arc<TestPlayer>) {
    new_playlist(PlaylistConfig::default())
}

pub fn new_playlist_with_preparser(
    config: PlaylistConfig,
) -> (
    PlaylistHandle<TestMedia>,
    Arc<TestPlayer>,
    Arc<TestPreparser>,
) {
    let player = Arc::new(TestPlayer::new());
    let preparser = Arc::new(TestPreparser::new());
    let player_for_factory = player.clone();
    let preparser_for_box: Box<dyn Preparser<TestMedia>> = Box::new(preparser.clone());
    let factory: PlayerFactory<TestMedia> = Box::new(move |_weak| Box::new(player_for_factory));
    let handle = Playlist::new(factory, Some(preparser_for_box), config);
    (handle, player, preparser)
}
