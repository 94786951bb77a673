use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::item::Item;
use crate::media::Media;

/// How many items at the tail of one cycle must not reappear at the head of
/// the next. VLC hardcodes this to 1; we keep the same constant rather than
/// exposing it, since nothing in this engine's public surface needs to tune
/// it.
const NOT_SAME_BEFORE: usize = 1;

/// A shuffle-on-demand permutation of a subset of the playlist's items.
///
/// The vector is split into three zones by two cursors:
///
/// ```text
/// 0        next  head            history       N
/// |---------|-----|.............|-------------|
///  <----------->               <------------->
///  determined                  prior-cycle history
/// ```
///
/// - `[0, head)`: items already drawn this cycle, in draw order.
/// - `[head, history)`: undetermined items for the current cycle.
/// - `[history, N)`: history of the previous cycle, in its original draw
///   order, kept around so backward navigation can cross a cycle boundary.
///
/// `next` is the cursor of the item that forward navigation will return;
/// the last-returned item sits at `next - 1` (mod N once wrapped).
pub struct Randomizer<M: Media> {
    items: Vec<Item<M>>,
    head: usize,
    next: usize,
    history: usize,
    loop_enabled: bool,
    rng: SmallRng,
}

impl<M: Media> Randomizer<M> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            head: 0,
            next: 0,
            history: 0,
            loop_enabled: false,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    pub fn is_loop(&self) -> bool {
        self.loop_enabled
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.head = 0;
        self.next = 0;
        self.history = 0;
    }

    fn index_of(&self, item: &Item<M>) -> Option<usize> {
        self.items.iter().position(|i| i.id() == item.id())
    }

    /// Inserts new items as undetermined for the current cycle, without
    /// disturbing the already-drawn prefix or the prior-cycle history.
    pub fn add(&mut self, new_items: &[Item<M>]) {
        let count = new_items.len();
        if count == 0 {
            return;
        }
        for (offset, item) in new_items.iter().enumerate() {
            self.items.insert(self.history + offset, item.clone());
        }
        if self.next > self.history {
            self.next += count;
        }
        self.history += count;
    }

    pub fn remove(&mut self, items: &[Item<M>]) {
        for item in items {
            if let Some(index) = self.index_of(item) {
                self.remove_at(index);
            }
        }
    }

    fn remove_at(&mut self, index: usize) {
        if index < self.next {
            self.next -= 1;
        }
        if index < self.head {
            self.items.remove(index);
            self.head -= 1;
            self.history -= 1;
        } else if index < self.history {
            // the middle zone is unordered: swap the target to its edge
            // before dropping it, so the shift only costs the tail.
            self.items.swap(index, self.history - 1);
            self.items.remove(self.history - 1);
            self.history -= 1;
        } else {
            self.items.remove(index);
        }
    }

    pub fn has_prev(&self) -> bool {
        let size = self.items.len();
        if size == 0 {
            return false;
        }
        if !self.loop_enabled {
            self.next > 1
        } else {
            (self.next + size - self.history) % size != 1
        }
    }

    pub fn has_next(&self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.loop_enabled || self.next < self.items.len()
    }

    pub fn peek_prev(&self) -> Option<&Item<M>> {
        let size = self.items.len();
        if size == 0 || !self.has_prev() {
            return None;
        }
        self.items.get((self.next + size - 2) % size)
    }

    pub fn peek_next(&mut self) -> Option<&Item<M>> {
        let size = self.items.len();
        if size == 0 {
            return None;
        }
        if self.loop_enabled && self.next == size && self.next == self.history {
            self.auto_reshuffle();
        }
        if self.next == self.head {
            self.determine_one(0);
        }
        self.items.get(self.next)
    }

    pub fn prev(&mut self) -> Option<Item<M>> {
        let item = self.peek_prev().cloned();
        if item.is_some() {
            let size = self.items.len();
            self.next = if self.next != 0 { self.next - 1 } else { size - 1 };
        }
        item
    }

    pub fn next(&mut self) -> Option<Item<M>> {
        let item = self.peek_next().cloned();
        if item.is_some() {
            let size = self.items.len();
            self.next += 1;
            if self.next == size && self.next != self.head {
                self.next = 0;
            }
        }
        item
    }

    /// Forces `item` to be treated as "just played": forward navigation
    /// resumes from right after it.
    pub fn select(&mut self, item: &Item<M>) {
        if let Some(index) = self.index_of(item) {
            self.select_index(index);
        }
    }

    fn select_index(&mut self, mut index: usize) {
        if self.history != 0 && index >= self.history {
            let item = self.items.remove(index);
            self.items.insert(self.history, item);
            index = self.history;
            self.history = (self.history + 1) % self.items.len();
        }
        if index >= self.head {
            self.items.swap(self.head, index);
            self.head += 1;
        } else {
            let item = self.items.remove(index);
            self.items.insert(self.head - 1, item);
        }
        self.next = self.head;
    }

    /// One Fisher-Yates draw: picks uniformly among the undetermined items
    /// that aren't within `avoid_last_n` of the tail, and swaps it into
    /// `head`.
    fn determine_one(&mut self, avoid_last_n: usize) {
        let size = self.items.len();
        let range_len = size - self.head - avoid_last_n;
        let selected = self.head + self.rng.gen_range(0..range_len);
        self.items.swap(self.head, selected);
        if self.head == self.history {
            self.history += 1;
        }
        self.head += 1;
    }

    /// Starts a new cycle, pre-determining the first `NOT_SAME_BEFORE`
    /// items so they can't repeat the tail of the cycle that just ended.
    fn auto_reshuffle(&mut self) {
        self.head = 0;
        self.next = 0;
        self.history = 0;
        let size = self.items.len();
        let mut avoid = NOT_SAME_BEFORE.min(size.saturating_sub(1));
        while avoid > 0 {
            self.determine_one(avoid);
            avoid -= 1;
        }
    }
}

impl<M: Media> Default for Randomizer<M> {
    fn default() -> Self {
        Self::new()
    }
}
