use std::time::Duration;

/// How aggressively newly-inserted items have their metadata fetched by the
/// external preparser collaborator (see [`crate::preparse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreparseMode {
    #[default]
    Disabled,
    Enabled,
    Recursive,
}

/// What to do once the player reports it stopped with no more media queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoppedAction {
    #[default]
    Continue,
    Pause,
    Stop,
    Exit,
}

/// Loop behavior across the whole playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRepeat {
    #[default]
    None,
    All,
    One,
}

/// Whether navigation follows list order or a shuffled permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackOrder {
    #[default]
    Normal,
    Random,
}

/// Coarse playback state reported by the external player, just detailed
/// enough for [`crate::player_bridge`] to act on a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Started,
    Playing,
    Paused,
    Stopped,
}

/// Construction-time parameters, mirroring the original
/// `vlc_playlist_New(parent, preparse_mode, preparse_threads, preparse_timeout)`
/// signature.
#[derive(Debug, Clone)]
pub struct PlaylistConfig {
    pub preparse_mode: PreparseMode,
    pub preparse_threads: usize,
    pub preparse_timeout: Duration,
    pub stopped_action: StoppedAction,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            preparse_mode: PreparseMode::Disabled,
            preparse_threads: 1,
            preparse_timeout: Duration::from_secs(10),
            stopped_action: StoppedAction::Continue,
        }
    }
}

/// A sort key understood by [`crate::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Duration,
    Artist,
    Album,
    TrackNumber,
    TrackId,
    Url,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One entry of a multi-key sort. Criteria are applied in order, each
/// breaking ties left by the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}
