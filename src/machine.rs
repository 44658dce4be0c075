//! This module defines the `TuringMachine` struct, the execution engine driving a single tape
//! with the rules of a [`Definition`]. It tracks the control state, the run status and a purely
//! informational step counter.

use crate::definition::{Definition, Transition};
use crate::tape::Tape;
use crate::types::{MachineError, State, Status, Symbol};
use log::{debug, trace, warn};
use std::fmt;

/// Represents a single-tape Turing Machine.
///
/// The machine owns its definition and, once initialized, its tape. Nothing is shared between
/// machines: two engines built from the same definition run independently.
#[derive(Debug, Clone)]
pub struct TuringMachine<S: State> {
    definition: Definition<S>,
    state: S,
    status: Status,
    tape: Option<Tape>,
    step_count: usize,
}

impl<S: State> TuringMachine<S> {
    /// Creates a new `TuringMachine` in [`Status::Ready`], sitting in the definition's initial
    /// state with no tape.
    pub fn new(definition: Definition<S>) -> Self {
        Self {
            state: definition.initial_state().clone(),
            definition,
            status: Status::Ready,
            tape: None,
            step_count: 0,
        }
    }

    /// Loads the input tape and starts the run.
    ///
    /// # Returns
    ///
    /// * `Ok(())` once the machine is `Running`.
    /// * `Err(MachineError::IllegalOperation)` unless the machine is `Ready`.
    pub fn initialize<I>(&mut self, symbols: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.expect_status("initialize", Status::Ready)?;

        self.tape = Some(Tape::new(symbols));
        self.status = Status::Running;

        Ok(())
    }

    /// Executes a single step of the machine's computation.
    ///
    /// Looks up the rule for the current state and the symbol under the head. When there is one,
    /// it writes, moves, switches state and flips to `Accepted` if the new state is accepting.
    /// When there is none, only the status changes, to `Error`.
    ///
    /// # Returns
    ///
    /// * `Ok(Status)` holding the status after the step.
    /// * `Err(MachineError::IllegalOperation)` unless the machine is `Running`.
    pub fn step(&mut self) -> Result<Status, MachineError> {
        self.expect_status("step", Status::Running)?;

        // `Running` is only ever entered together with a fresh tape, so this never fires in
        // practice.
        let status = self.status;
        let tape = self.tape.as_mut().ok_or(MachineError::IllegalOperation {
            operation: "step",
            expected: Status::Running,
            actual: status,
        })?;

        let symbol = tape.read();
        let Some(transition) = self.definition.lookup(&self.state, symbol) else {
            warn!(
                "No transition for state {} reading {:?} at position {}",
                self.state,
                symbol,
                tape.position()
            );
            self.status = Status::Error;
            return Ok(self.status);
        };

        trace!(
            "{} reading {:?}: write {:?}, move {}, go to {}",
            self.state,
            symbol,
            transition.write,
            transition.direction,
            transition.next_state
        );

        tape.write(transition.write);
        tape.move_head(transition.direction);
        self.state = transition.next_state.clone();
        self.step_count += 1;

        if self.definition.is_accepting(&self.state) {
            debug!(
                "Accepted in state {} after {} steps",
                self.state, self.step_count
            );
            self.status = Status::Accepted;
        }

        Ok(self.status)
    }

    /// Steps until the status is final and returns it.
    ///
    /// There is no step limit: a definition that never halts keeps this call running.
    pub fn run(&mut self) -> Result<Status, MachineError> {
        while !self.step()?.is_final() {}

        Ok(self.status)
    }

    /// Returns to `Ready` in the initial state and drops the tape.
    pub fn reset(&mut self) {
        self.state = self.definition.initial_state().clone();
        self.status = Status::Ready;
        self.tape = None;
        self.step_count = 0;
    }

    /// Returns the current control state.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the tape, absent before `initialize` and after `reset`.
    pub fn tape(&self) -> Option<&Tape> {
        self.tape.as_ref()
    }

    /// Returns the total number of transitions applied since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn definition(&self) -> &Definition<S> {
        &self.definition
    }

    /// Returns the rule the next `step` would apply, if the machine is running and one exists.
    pub fn transition(&self) -> Option<Transition<'_, S>> {
        if self.status != Status::Running {
            return None;
        }

        let tape = self.tape.as_ref()?;
        self.definition.lookup(&self.state, tape.read())
    }

    fn expect_status(&self, operation: &'static str, expected: Status) -> Result<(), MachineError> {
        if self.status != expected {
            return Err(MachineError::IllegalOperation {
                operation,
                expected,
                actual: self.status,
            });
        }

        Ok(())
    }
}

/// Two-part dump: status and control state, then the tape when there is one.
impl<S: State> fmt::Display for TuringMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Machine state:  {}", self.status)?;
        write!(f, "Internal state: {}", self.state)?;

        if let Some(tape) = &self.tape {
            write!(f, "\n\n{}", tape)?;
        }

        Ok(())
    }
}
