// history.rs - Generation ledger with a rewind cursor

use std::collections::VecDeque;

use tracing::debug;

use crate::grid::Generation;

/// What [`History::record`] did with a freshly computed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Cursor was at the head; the generation was appended.
    Appended,
    /// Cursor was rewound and the stored successor was identical; the cursor moved onto it.
    Replayed,
    /// Cursor was rewound and the stored future differed; it was discarded before appending.
    Forked { discarded: usize },
}

/// Ordered generations plus the index of the displayed one.
///
/// Play only ever appends. Moving the cursor never changes what is stored;
/// the stored future is discarded only by [`History::fork`] or when a
/// recomputed successor disagrees with it. With a retention limit the
/// oldest generations fall off the front and the cursor shifts with them.
#[derive(Debug, Clone)]
pub struct History {
    generations: VecDeque<Generation>,
    cursor: usize,
    limit: Option<usize>,
    dropped: u64,
}

impl History {
    pub fn new(initial: Generation, limit: Option<usize>) -> Self {
        Self {
            generations: VecDeque::from([initial]),
            cursor: 0,
            limit,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Always `false`: the seed generation is never removed.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_at_head(&self) -> bool {
        self.cursor + 1 == self.generations.len()
    }

    /// Absolute generation number of the cursor, counting any dropped by the retention limit.
    pub fn generation_number(&self) -> u64 {
        self.dropped + self.cursor as u64
    }

    pub fn get(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Generation> {
        self.generations.iter()
    }

    /// The displayed generation.
    pub fn current(&self) -> &Generation {
        &self.generations[self.cursor]
    }

    /// The newest generation.
    pub fn head(&self) -> &Generation {
        &self.generations[self.generations.len() - 1]
    }

    /// Mutable access to the newest generation, for in-place edits.
    pub(crate) fn head_mut(&mut self) -> &mut Generation {
        let last = self.generations.len() - 1;
        &mut self.generations[last]
    }

    /// Moves the cursor back one generation. `false` when already at the start.
    pub fn step_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves the cursor onto an already stored generation. `false` at the head.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_head() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Discards every generation after the cursor, making it the head.
    pub fn fork(&mut self) -> usize {
        let discarded = self.generations.len() - self.cursor - 1;
        if discarded > 0 {
            self.generations.truncate(self.cursor + 1);
            debug!(discarded, cursor = self.cursor, "discarded stored future");
        }
        discarded
    }

    /// Stores `next` as the successor of the cursor generation and moves onto it.
    pub fn record(&mut self, next: Generation) -> Recorded {
        if self.is_at_head() {
            self.push(next);
            return Recorded::Appended;
        }
        if self.generations[self.cursor + 1] == next {
            self.cursor += 1;
            return Recorded::Replayed;
        }
        let discarded = self.fork();
        self.push(next);
        Recorded::Forked { discarded }
    }

    fn push(&mut self, next: Generation) {
        self.generations.push_back(next);
        if let Some(limit) = self.limit {
            while self.generations.len() > limit {
                self.generations.pop_front();
                self.dropped += 1;
            }
        }
        self.cursor = self.generations.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(n: i64) -> Generation {
        Generation::with_live(8, 1, &[(n, 0)])
    }

    fn filled(len: i64) -> History {
        let mut history = History::new(marked(0), None);
        for n in 1..len {
            history.record(marked(n));
        }
        history
    }

    #[test]
    fn record_at_head_appends() {
        let history = filled(4);
        assert!(!history.is_empty());
        assert_eq!(history.len(), 4);
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.current(), &marked(3));
    }

    #[test]
    fn step_back_stops_at_start() {
        let mut history = filled(2);
        assert!(history.step_back());
        assert!(!history.step_back());
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn step_forward_walks_stored_generations_only() {
        let mut history = filled(3);
        assert!(!history.step_forward());
        history.step_back();
        history.step_back();
        assert!(history.step_forward());
        assert_eq!(history.current(), &marked(1));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn matching_successor_replays() {
        let mut history = filled(4);
        history.step_back();
        history.step_back();
        assert_eq!(history.record(marked(2)), Recorded::Replayed);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn differing_successor_forks() {
        let mut history = filled(4);
        history.step_back();
        history.step_back();
        assert_eq!(history.record(marked(7)), Recorded::Forked { discarded: 2 });
        assert_eq!(history.len(), 3);
        assert!(history.is_at_head());
        assert_eq!(history.head(), &marked(7));
    }

    #[test]
    fn fork_at_head_is_noop() {
        let mut history = filled(3);
        assert_eq!(history.fork(), 0);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn limit_drops_oldest_and_keeps_numbering() {
        let mut history = History::new(marked(0), Some(3));
        for n in 1..6 {
            history.record(marked(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.generation_number(), 5);
        assert_eq!(history.get(0), Some(&marked(3)));

        history.step_back();
        history.step_back();
        assert!(!history.step_back());
        assert_eq!(history.generation_number(), 3);
    }
}
