// capture.rs - Capture table and recursion budget of one match attempt.

use std::cell::Cell;

use smallvec::SmallVec;

use crate::config::MAX_CAPTURES;
use crate::error::LexError;

/// State of one capture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Opened by `(` and not yet closed.
    Unfinished,
    /// Opened by `()`: records a position, not text.
    Position,
    /// Closed, holding this many units.
    Finished(usize),
}

/// One capture slot: an offset into the subject plus its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub offset: usize,
    pub state: CaptureState,
}

impl Capture {
    /// A finished capture spanning `start..end`.
    pub fn span(start: usize, end: usize) -> Self {
        Capture {
            offset: start,
            state: CaptureState::Finished(end - start),
        }
    }

    /// Length of the captured text; zero for position and unfinished slots.
    pub fn len(&self) -> usize {
        match self.state {
            CaptureState::Finished(len) => len,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) type CaptureSlots = SmallVec<[Capture; MAX_CAPTURES]>;

/// Bounded, ordered list of capture slots.
///
/// Slots are opened in pattern order and closed innermost first.
#[derive(Debug, Clone)]
pub struct CaptureTable {
    slots: CaptureSlots,
    capacity: usize,
}

impl CaptureTable {
    pub fn new(capacity: usize) -> Self {
        CaptureTable {
            slots: SmallVec::new(),
            capacity,
        }
    }

    /// Number of opened slots (finished or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, i: usize) -> Option<&Capture> {
        self.slots.get(i)
    }

    pub fn as_slice(&self) -> &[Capture] {
        &self.slots
    }

    /// Open a new slot at subject offset `offset`.
    pub fn open(&mut self, offset: usize, position_only: bool) -> Result<(), LexError> {
        if self.slots.len() >= self.capacity {
            log::debug!("capture table full ({} slots)", self.capacity);
            return Err(LexError::CaptureTooMany);
        }
        let state = if position_only {
            CaptureState::Position
        } else {
            CaptureState::Unfinished
        };
        self.slots.push(Capture { offset, state });
        Ok(())
    }

    /// Drop the most recently opened slot.
    pub fn undo_open(&mut self) {
        self.slots.pop();
    }

    /// Close the innermost unfinished slot at subject offset `end`.
    ///
    /// Returns the index of the closed slot.
    pub fn close(&mut self, end: usize) -> Result<usize, LexError> {
        let i = self
            .slots
            .iter()
            .rposition(|cap| cap.state == CaptureState::Unfinished)
            .ok_or(LexError::CaptureInvalidPattern)?;
        let cap = &mut self.slots[i];
        cap.state = CaptureState::Finished(end - cap.offset);
        Ok(i)
    }

    /// Reopen slot `i` after the match past its `)` failed.
    pub fn reopen(&mut self, i: usize) {
        self.slots[i].state = CaptureState::Unfinished;
    }

    /// Fails if any opened slot is still unfinished.
    pub fn check_finished(&self) -> Result<(), LexError> {
        if self.slots.iter().any(|cap| cap.state == CaptureState::Unfinished) {
            return Err(LexError::CaptureNotFinished);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn take_slots(&mut self) -> CaptureSlots {
        std::mem::take(&mut self.slots)
    }
}

/// Remaining recursion budget of one match attempt.
#[derive(Debug)]
pub struct DepthBudget {
    remaining: Cell<usize>,
    limit: usize,
}

impl DepthBudget {
    pub fn new(limit: usize) -> Self {
        DepthBudget {
            remaining: Cell::new(limit),
            limit,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    /// True when no guard is alive.
    pub fn is_full(&self) -> bool {
        self.remaining.get() == self.limit
    }

    /// Take one unit of budget for the lifetime of the returned guard.
    pub fn enter(&self) -> Result<DepthGuard<'_>, LexError> {
        let left = self.remaining.get();
        if left == 0 {
            log::debug!("recursion budget of {} exhausted", self.limit);
            return Err(LexError::PatternTooComplex);
        }
        self.remaining.set(left - 1);
        Ok(DepthGuard { budget: self })
    }
}

/// Gives its unit of budget back when dropped, on every exit path.
#[derive(Debug)]
pub struct DepthGuard<'b> {
    budget: &'b DepthBudget,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        let r = &self.budget.remaining;
        r.set(r.get() + 1);
    }
}
