use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

/// An externally-defined, opaque descriptor of playable content.
///
/// The engine never decodes or plays a `Media`; it only stores, compares
/// (by identity, via `Arc::ptr_eq`) and sorts them. Everything below has a
/// default so a minimal implementation only needs `title`.
pub trait Media: fmt::Debug + Send + Sync {
    fn title(&self) -> &str;

    fn artist(&self) -> &str {
        ""
    }

    fn album(&self) -> &str {
        ""
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn track_number(&self) -> Option<u32> {
        None
    }

    fn url(&self) -> &str {
        ""
    }

    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Whether metadata discovery has already completed for this media.
    /// `Playlist::auto_preparse` skips dispatching a preparse request when
    /// this is already true.
    fn is_preparsed(&self) -> bool {
        true
    }
}
