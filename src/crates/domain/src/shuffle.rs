use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::media::Media;
use crate::playlist::Playlist;

impl<M: Media + 'static> Playlist<M> {
    /// One-shot Fisher-Yates permutation of the whole content store,
    /// distinct from the lazily-maintained navigable order in
    /// [`crate::randomizer`]. A no-op below two items.
    pub fn shuffle(&mut self) {
        if self.items.len() < 2 {
            return;
        }

        let current_id = self.current.map(|i| self.items[i].id());

        let mut rng = SmallRng::from_entropy();
        for i in (1..self.items.len()).rev() {
            let selected = rng.gen_range(0..=i);
            self.items.swap(i, selected);
        }

        let saved = self.save_state();
        if let Some(id) = current_id {
            self.current = self.items.iter().position(|item| item.id() == id);
            self.refresh_has_prev_next();
        }

        crate::listener::notify_items_reset(&mut self.listeners, &self.items);
        self.notify_state_changes(saved);
    }
}
