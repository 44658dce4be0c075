//! This module defines the core data structures and types shared by the tape, the machine
//! definition and the execution engine: symbols, head directions, run status and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// A single tape symbol.
pub type Symbol = char;

/// The blank sentinel written in every cell that has never been written.
pub const BLANK_SYMBOL: Symbol = '_';

/// Anything usable as a control state identifier.
///
/// States only need to be comparable and hashable so they can key the transition table;
/// `Display` is required for dumps and log lines.
pub trait State: Clone + Eq + Hash + fmt::Display {}

impl<T> State for T where T: Clone + Eq + Hash + fmt::Display {}

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        };
        write!(f, "{}", c)
    }
}

/// Lifecycle status of a [`TuringMachine`](crate::TuringMachine).
///
/// `Ready -> Running -> {Accepted, Error}`. The two last ones are final and only
/// `reset` brings the machine back to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Constructed or reset, waiting for an input tape.
    Ready,
    /// Initialized and accepting `step` calls.
    Running,
    /// Reached one of the definition's accepting states.
    Accepted,
    /// No transition was defined for the current state and symbol.
    Error,
}

impl Status {
    /// Whether no further step can change this status.
    pub fn is_final(self) -> bool {
        matches!(self, Status::Accepted | Status::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ready => "READY",
            Status::Running => "RUNNING",
            Status::Accepted => "ACCEPTED",
            Status::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Represents the errors surfaced by the library.
///
/// A missing transition is not one of them: it is a legitimate machine outcome reported
/// through [`Status::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// An engine operation was called while the machine was in the wrong status.
    #[error("Illegal operation: {operation} requires status {expected}, machine is {actual}")]
    IllegalOperation {
        operation: &'static str,
        expected: Status,
        actual: Status,
    },
    /// Two actions of one definition share the same (state, symbol) key.
    #[error("Duplicate transition for state {state} reading {symbol:?}")]
    DuplicateTransition { state: String, symbol: Symbol },
    /// The adder generator only supports widths in `1..=MAX_BITS`.
    #[error("Invalid bit width: {0}")]
    InvalidBitWidth(usize),
    /// An operand does not fit in the requested number of bits.
    #[error("Operand {operand} does not fit in {bits} bits")]
    OperandOverflow { operand: u64, bits: usize },
    /// Indicates a problem found by the definition analyzer.
    #[error("Definition validation error: {0}")]
    ValidationError(String),
}
