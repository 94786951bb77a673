use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("no such item in the playlist")]
    NoItem,
    #[error("no previous item")]
    NoPrev,
    #[error("no next item")]
    NoNext,
    #[error("player rejected the request: {0}")]
    Player(String),
}
