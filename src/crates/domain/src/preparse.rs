use std::sync::Arc;

use log::trace;

use crate::media::Media;
use crate::player::PlaylistWeakHandle;
use crate::playlist::Playlist;

/// The external metadata/subitem discovery collaborator. A request is
/// fire-and-forget from the engine's point of view (see the crate's
/// concurrency notes): the preparser runs on its own worker pool and
/// reports back by re-locking the playlist through the weak handle it was
/// given, exactly as the original's `on_preparse_ended` /
/// `on_subtree_added` callbacks re-enter through `vlc_playlist_Lock`.
pub trait Preparser<M: Media>: Send {
    fn request(&self, handle: PlaylistWeakHandle<M>, media: Arc<M>);
}

/// The result a preparser reports back through [`Playlist::on_preparse_ended`],
/// mirroring the original's `enum input_item_preparse_status`. Only `Done`
/// causes listeners to be told the item's metadata changed; `Failed` is
/// silently dropped, matching `preparse.c`'s `if (status !=
/// ITEM_PREPARSE_DONE) return;` guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparseOutcome {
    Done,
    Failed,
}

/// A node of the subitem tree a preparser discovers underneath a single
/// media (e.g. the entries of a playlist file, or a disc's titles). This
/// replaces the original's `input_item_node_t` tree, walked here instead of
/// through a C vector-of-children pointer.
#[derive(Debug, Clone)]
pub struct MediaNode<M: Media> {
    pub media: Arc<M>,
    pub children: Vec<MediaNode<M>>,
}

impl<M: Media> MediaNode<M> {
    pub fn leaf(media: Arc<M>) -> Self {
        Self {
            media,
            children: Vec::new(),
        }
    }

    fn collect_children(&self, out: &mut Vec<Arc<M>>) {
        for child in &self.children {
            out.push(Arc::clone(&child.media));
            child.collect_children(out);
        }
    }
}

impl<M: Media + 'static> Playlist<M> {
    /// Replaces the item at `index` by the depth-first flattening of
    /// `node`'s subtree.
    pub fn expand_item(&mut self, index: usize, node: &MediaNode<M>) -> Result<(), crate::error::PlaylistError> {
        let mut flatten = Vec::new();
        node.collect_children(&mut flatten);
        self.expand(index, &flatten)
    }

    /// Locates `node.media` in the playlist and replaces it by its
    /// flattened subtree. Used both when the player reports subitems for
    /// the media it is currently playing, and when the preparser reports a
    /// discovered subtree for a media it was asked to resolve.
    pub fn expand_item_from_node(
        &mut self,
        node: &MediaNode<M>,
    ) -> Result<(), crate::error::PlaylistError> {
        let index = self
            .index_of_media(&node.media)
            .ok_or(crate::error::PlaylistError::NoItem)?;
        self.expand_item(index, node)
    }

    /// Preparser callback: on a failed fetch, does nothing (the item's
    /// metadata didn't change, so listeners have nothing to learn). On
    /// success, re-locates `media` (it may have moved or been removed
    /// since the request was made) and, if still present, notifies
    /// listeners that its metadata changed.
    pub fn on_preparse_ended(&mut self, media: &Arc<M>, outcome: PreparseOutcome) {
        if outcome != PreparseOutcome::Done {
            trace!("playlist: preparse failed, not notifying listeners");
            return;
        }
        let Some(index) = self.index_of_media(media) else {
            return;
        };
        let items = [self.items[index].clone()];
        crate::listener::notify_items_updated(&mut self.listeners, index, &items);
    }

    /// Preparser callback: a subtree was discovered underneath `node.media`
    /// (e.g. it turned out to be a container). The item not being found
    /// any more is not an error here, only logged — it was concurrently
    /// removed.
    pub fn on_subtree_added(&mut self, node: &MediaNode<M>) {
        if self.expand_item_from_node(node).is_err() {
            trace!("playlist: subtree reported for a media no longer in the playlist");
        }
    }
}
