//! Bounded per-player match history
//!
//! Fixed-size ring buffer: `head` is the next slot to write, `len` the number
//! of valid slots. Once full, every push overwrites the oldest record.

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;
use crate::moves::{Move, Outcome};
use crate::HISTORY_CAPACITY;

/// A single resolved match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
}

impl Default for MatchRecord {
    fn default() -> Self {
        Self {
            player_move: Move::Rock,
            opponent_move: Move::Rock,
            outcome: Outcome::Tie,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct MatchHistory {
    records: [MatchRecord; HISTORY_CAPACITY],
    head: u8,
    len: u8,
}

/// Serialized layout; cursors are untrusted until clamped by `from_raw`
#[derive(Deserialize)]
struct StoredHistory {
    records: [MatchRecord; HISTORY_CAPACITY],
    head: u8,
    len: u8,
}

impl From<StoredHistory> for MatchHistory {
    fn from(stored: StoredHistory) -> Self {
        Self::from_raw(stored.records, stored.head, stored.len)
    }
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored slots; out-of-range cursors are clamped.
    pub fn from_raw(records: [MatchRecord; HISTORY_CAPACITY], head: u8, len: u8) -> Self {
        Self {
            records,
            head: head % HISTORY_CAPACITY as u8,
            len: len.min(HISTORY_CAPACITY as u8),
        }
    }

    /// Stored slots and cursors, in the layout `from_raw` accepts
    pub fn raw(&self) -> (&[MatchRecord; HISTORY_CAPACITY], u8, u8) {
        (&self.records, self.head, self.len)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append at the head, evicting the oldest record when full
    pub fn push(&mut self, record: MatchRecord) {
        let head = self.head as usize;
        self.records[head] = record;
        self.head = ((head + 1) % HISTORY_CAPACITY) as u8;

        if (self.len as usize) < HISTORY_CAPACITY {
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Records from newest to oldest
    pub fn iter_newest(&self) -> impl Iterator<Item = &MatchRecord> + '_ {
        let head = self.head as usize;
        (0..self.len as usize).map(move |i| {
            &self.records[(head + HISTORY_CAPACITY - 1 - i) % HISTORY_CAPACITY]
        })
    }

    /// The `count` most recent records, newest first.
    ///
    /// `count` must lie in `[1, HISTORY_CAPACITY]`; fewer records are
    /// returned when fewer are stored.
    pub fn recent(&self, count: u8) -> Result<Vec<MatchRecord>, ArenaError> {
        if count < 1 || count as usize > HISTORY_CAPACITY {
            return Err(ArenaError::InvalidRange);
        }
        Ok(self.iter_newest().take(count as usize).copied().collect())
    }
}
