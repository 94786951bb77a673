//! Playback playlist engine.
//!
//! This crate is a thin facade over [`domain`], which holds the actual
//! implementation: the ordered item store, the navigation state machine and
//! the randomizer. Splitting the workspace this way follows the layering
//! the rest of this codebase uses elsewhere (entities live in `domain`);
//! there is no persistence or transport layer here because this engine has
//! none — see `DESIGN.md` for what was dropped and why.
pub use domain::*;
