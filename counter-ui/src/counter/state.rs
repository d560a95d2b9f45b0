//! Counter state machine

use thiserror::Error;

/// Shown while the error flag is set
pub const ERROR_MESSAGE: &str = "Error: Counter can't go below zero";

/// Decrement was attempted at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("counter can't go below zero")]
pub struct FloorViolation;

/// User-issued commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increment,
    Decrement,
}

/// Count plus the error flag raised by a rejected decrement.
///
/// The count is unsigned, so the floor is a type invariant; the guard in
/// [`decrement`](Self::decrement) decides what a rejected attempt looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    count: u64,
    error_active: bool,
}

impl CounterState {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Start at `count` with no error shown
    pub fn with_count(count: u64) -> Self {
        Self { count, error_active: false }
    }
    
    pub fn count(&self) -> u64 {
        self.count
    }
    
    pub fn error_active(&self) -> bool {
        self.error_active
    }
    
    /// Always succeeds and clears any pending error
    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.error_active = false;
        self.count
    }
    
    /// Step down by one, or raise the error flag when already at zero.
    /// A successful decrement leaves the flag alone: it can only be set at zero.
    pub fn decrement(&mut self) -> Result<u64, FloorViolation> {
        match self.count.checked_sub(1) {
            Some(count) => {
                self.count = count;
                Ok(count)
            }
            None => {
                self.error_active = true;
                Err(FloorViolation)
            }
        }
    }
    
    /// Apply a command, returning the new count or the rejection.
    /// The rejection is already recorded in the state; callers only log it.
    pub fn apply(&mut self, command: Command) -> Result<u64, FloorViolation> {
        match command {
            Command::Increment => Ok(self.increment()),
            Command::Decrement => self.decrement(),
        }
    }
    
    /// Text of the counter display
    pub fn display_text(&self) -> String {
        format!("the counter is currently {}", self.count)
    }
}
