use crate::config::{PlaybackOrder, PlaybackRepeat, StoppedAction};
use crate::item::Item;
use crate::media::Media;
use crate::value::ListenerId;

/// The full listener callback vocabulary. Every method is optional (default
/// no-op), mirroring the original's `struct vlc_playlist_callbacks` where
/// every field may be `NULL`.
///
/// Callbacks are invoked synchronously, in registration order, from inside
/// the mutator's critical section (see the crate's concurrency notes). A
/// listener must not call back into the playlist, and must not block.
#[allow(unused_variables)]
pub trait PlaylistListener<M: Media>: Send {
    fn on_items_reset(&mut self, items: &[Item<M>]) {}
    fn on_items_added(&mut self, index: usize, items: &[Item<M>]) {}
    fn on_items_moved(&mut self, index: usize, count: usize, target: usize) {}
    fn on_items_removed(&mut self, index: usize, count: usize) {}
    fn on_items_updated(&mut self, index: usize, items: &[Item<M>]) {}
    fn on_playback_repeat_changed(&mut self, repeat: PlaybackRepeat) {}
    fn on_playback_order_changed(&mut self, order: PlaybackOrder) {}
    fn on_media_stopped_action_changed(&mut self, action: StoppedAction) {}
    fn on_current_index_changed(&mut self, index: Option<usize>) {}
    fn on_has_prev_changed(&mut self, has_prev: bool) {}
    fn on_has_next_changed(&mut self, has_next: bool) {}
    /// Ambient addition (not in the original): surfaces the `Exit`
    /// stopped-action transition instead of this library calling into
    /// process control itself. See the crate's design notes.
    fn on_shutdown_requested(&mut self) {}
}

/// Owned collection of registered listeners, replacing the original's
/// intrusive `vlc_list` of `vlc_playlist_listener_id` nodes. `ListenerId` is
/// an opaque handle; no raw pointers are exposed through the public API.
pub struct ListenerRegistry<M: Media> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn PlaylistListener<M>>)>,
}

impl<M: Media> ListenerRegistry<M> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: Box<dyn PlaylistListener<M>>) -> ListenerId {
        let id = ListenerId::from(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns whether a listener with that id was actually present.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != len_before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_mut(&mut self, id: ListenerId) -> Option<&mut Box<dyn PlaylistListener<M>>> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, listener)| listener)
    }
}

impl<M: Media> Default for ListenerRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot of the fields every mutator may change, taken before the
/// mutation and compared after, so notifications only fire for fields whose
/// value actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SavedState {
    pub current: Option<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

pub(crate) fn notify_items_reset<M: Media>(registry: &mut ListenerRegistry<M>, items: &[Item<M>]) {
    for (_, listener) in &mut registry.entries {
        listener.on_items_reset(items);
    }
}

pub(crate) fn notify_items_added<M: Media>(
    registry: &mut ListenerRegistry<M>,
    index: usize,
    items: &[Item<M>],
) {
    for (_, listener) in &mut registry.entries {
        listener.on_items_added(index, items);
    }
}

pub(crate) fn notify_items_moved<M: Media>(
    registry: &mut ListenerRegistry<M>,
    index: usize,
    count: usize,
    target: usize,
) {
    for (_, listener) in &mut registry.entries {
        listener.on_items_moved(index, count, target);
    }
}

pub(crate) fn notify_items_removed<M: Media>(
    registry: &mut ListenerRegistry<M>,
    index: usize,
    count: usize,
) {
    for (_, listener) in &mut registry.entries {
        listener.on_items_removed(index, count);
    }
}

pub(crate) fn notify_items_updated<M: Media>(
    registry: &mut ListenerRegistry<M>,
    index: usize,
    items: &[Item<M>],
) {
    for (_, listener) in &mut registry.entries {
        listener.on_items_updated(index, items);
    }
}

pub(crate) fn notify_playback_repeat_changed<M: Media>(
    registry: &mut ListenerRegistry<M>,
    repeat: PlaybackRepeat,
) {
    for (_, listener) in &mut registry.entries {
        listener.on_playback_repeat_changed(repeat);
    }
}

pub(crate) fn notify_playback_order_changed<M: Media>(
    registry: &mut ListenerRegistry<M>,
    order: PlaybackOrder,
) {
    for (_, listener) in &mut registry.entries {
        listener.on_playback_order_changed(order);
    }
}

pub(crate) fn notify_media_stopped_action_changed<M: Media>(
    registry: &mut ListenerRegistry<M>,
    action: StoppedAction,
) {
    for (_, listener) in &mut registry.entries {
        listener.on_media_stopped_action_changed(action);
    }
}

pub(crate) fn notify_shutdown_requested<M: Media>(registry: &mut ListenerRegistry<M>) {
    for (_, listener) in &mut registry.entries {
        listener.on_shutdown_requested();
    }
}

pub(crate) fn notify_state_changes<M: Media>(
    registry: &mut ListenerRegistry<M>,
    saved: SavedState,
    current: Option<usize>,
    has_prev: bool,
    has_next: bool,
) {
    if saved.current != current {
        for (_, listener) in &mut registry.entries {
            listener.on_current_index_changed(current);
        }
    }
    if saved.has_prev != has_prev {
        for (_, listener) in &mut registry.entries {
            listener.on_has_prev_changed(has_prev);
        }
    }
    if saved.has_next != has_next {
        for (_, listener) in &mut registry.entries {
            listener.on_has_next_changed(has_next);
        }
    }
}

/// Notifies a single, just-registered listener of the current playlist
/// state, as if it had witnessed every event leading up to it (used by
/// `add_listener(..., notify_current_state: true)`).
pub(crate) fn notify_current_state<M: Media>(
    registry: &mut ListenerRegistry<M>,
    id: ListenerId,
    items: &[Item<M>],
    repeat: PlaybackRepeat,
    order: PlaybackOrder,
    current: Option<usize>,
    has_prev: bool,
    has_next: bool,
) {
    if let Some(listener) = registry.get_mut(id) {
        listener.on_items_reset(items);
        listener.on_playback_repeat_changed(repeat);
        listener.on_playback_order_changed(order);
        listener.on_current_index_changed(current);
        listener.on_has_prev_changed(has_prev);
        listener.on_has_next_changed(has_next);
    }
}
