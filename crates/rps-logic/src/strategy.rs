//! Opponent strategies for the single-player variants

use crate::moves::Move;

/// Default number of observed moves the predictive opponent remembers
pub const DEFAULT_MEMORY_CAPACITY: usize = 10;

/// A computer-controlled second mover
pub trait OpponentStrategy {
    /// Pick the move for the current round
    fn next_move(&mut self) -> Move;

    /// Observe the human player's move once the round is resolved
    fn record_observed_move(&mut self, observed: Move);
}

/// Rotates through Rock, Paper, Scissors
///
/// The index is advanced before it is read, so a fresh opponent opens with
/// Paper: Paper, Scissors, Rock, Paper, ...
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CyclicOpponent {
    index: u8,
}

impl CyclicOpponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted rotation index (0-2)
    pub fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Move::ALL.len() {
            Some(Self { index })
        } else {
            None
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }
}

impl OpponentStrategy for CyclicOpponent {
    fn next_move(&mut self) -> Move {
        self.index = (self.index + 1) % Move::ALL.len() as u8;
        let next = Move::ALL[self.index as usize];
        log::debug!("Cyclic opponent plays {}", next);
        next
    }

    fn record_observed_move(&mut self, _observed: Move) {}
}

/// Fixed-capacity FIFO of observed moves
///
/// Slots `[0, cursor)` are populated, the rest are empty. Once full, each new
/// move evicts the oldest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpponentMemory {
    slots: Vec<Option<Move>>,
    cursor: usize,
}

impl OpponentMemory {
    /// Empty memory. Capacity is at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            cursor: 0,
        }
    }

    /// Rebuild from persisted slots and cursor, rejecting inconsistent layouts
    pub fn from_parts(slots: Vec<Option<Move>>, cursor: usize) -> Option<Self> {
        if slots.is_empty() || cursor > slots.len() {
            return None;
        }
        let (populated, empty) = slots.split_at(cursor);
        if populated.iter().any(Option::is_none) || empty.iter().any(Option::is_some) {
            return None;
        }
        Some(Self { slots, cursor })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_full(&self) -> bool {
        self.cursor == self.slots.len()
    }

    /// All slots, including the empty tail
    pub fn slots(&self) -> &[Option<Move>] {
        &self.slots
    }

    /// Populated moves, oldest first
    pub fn history(&self) -> Vec<Move> {
        self.slots[..self.cursor].iter().flatten().copied().collect()
    }

    pub fn record(&mut self, observed: Move) {
        if self.is_full() {
            self.slots.rotate_left(1);
            let last = self.slots.len() - 1;
            self.slots[last] = Some(observed);
        } else {
            self.slots[self.cursor] = Some(observed);
            self.cursor += 1;
        }
    }
}

impl Default for OpponentMemory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }
}

/// Learns which move tends to follow the player's latest one and counters it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredictiveOpponent {
    memory: OpponentMemory,
}

impl PredictiveOpponent {
    pub fn new(capacity: usize) -> Self {
        Self {
            memory: OpponentMemory::with_capacity(capacity),
        }
    }

    pub fn with_memory(memory: OpponentMemory) -> Self {
        Self { memory }
    }

    pub fn memory(&self) -> &OpponentMemory {
        &self.memory
    }

    /// Guess the player's next move, or `None` with fewer than two observations
    ///
    /// Every earlier occurrence of the latest move votes for the move that
    /// followed it. Ties (including no votes at all) go to the earlier move in
    /// Rock, Paper, Scissors order.
    pub fn predict(&self) -> Option<Move> {
        let history = self.memory.history();
        let last = *history.last()?;
        if history.len() < 2 {
            return None;
        }

        let mut tally = [0u32; 3];
        for pair in history.windows(2) {
            if pair[0] == last {
                tally[tally_slot(pair[1])] += 1;
            }
        }

        let mut predicted = Move::Rock;
        let mut best = tally[0];
        for (candidate, count) in Move::ALL.iter().zip(tally).skip(1) {
            if count > best {
                predicted = *candidate;
                best = count;
            }
        }
        Some(predicted)
    }
}

fn tally_slot(m: Move) -> usize {
    match m {
        Move::Rock => 0,
        Move::Paper => 1,
        Move::Scissors => 2,
    }
}

impl OpponentStrategy for PredictiveOpponent {
    fn next_move(&mut self) -> Move {
        match self.predict() {
            None => {
                log::debug!("Predictive opponent has no pattern yet, opening with {}", Move::Rock);
                Move::Rock
            }
            Some(predicted) => {
                log::debug!("Predictive opponent expects {}, countering", predicted);
                predicted.counter()
            }
        }
    }

    fn record_observed_move(&mut self, observed: Move) {
        self.memory.record(observed);
    }
}

/// Per-match opponent state, owned by the match and persisted with it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpponentState {
    Cyclic(CyclicOpponent),
    Predictive(PredictiveOpponent),
}

impl OpponentStrategy for OpponentState {
    fn next_move(&mut self) -> Move {
        match self {
            OpponentState::Cyclic(opponent) => opponent.next_move(),
            OpponentState::Predictive(opponent) => opponent.next_move(),
        }
    }

    fn record_observed_move(&mut self, observed: Move) {
        match self {
            OpponentState::Cyclic(opponent) => opponent.record_observed_move(observed),
            OpponentState::Predictive(opponent) => opponent.record_observed_move(observed),
        }
    }
}
