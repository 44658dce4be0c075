//! Reusable transition generators used to assemble tables without spelling out every rule.
//!
//! A [`TableBuilder`] collects [`Action`]s for a fixed alphabet. Its primitives cover the three
//! shapes the adder needs: walking a fixed distance, forking on the symbol under the head, and
//! writing unconditionally before moving on. "Every symbol" always means the blank plus each
//! alphabet symbol.

use crate::definition::{Action, Definition};
use crate::types::{Direction, MachineError, State, Symbol, BLANK_SYMBOL};

/// Accumulates the actions of a definition under construction.
#[derive(Debug, Clone)]
pub struct TableBuilder<S> {
    symbols: Vec<Symbol>,
    actions: Vec<Action<S>>,
}

impl<S: State> TableBuilder<S> {
    /// Creates a builder for `alphabet`. The blank symbol is always readable and does not need
    /// to be listed.
    pub fn new(alphabet: &[Symbol]) -> Self {
        let mut symbols = vec![BLANK_SYMBOL];
        symbols.extend(alphabet.iter().filter(|&&s| s != BLANK_SYMBOL));

        Self {
            symbols,
            actions: Vec::new(),
        }
    }

    /// Emits `count` chained states `template(0) .. template(count - 1)`, each moving one cell in
    /// `direction` whatever it reads and leaving the content unchanged. The last one hands over
    /// to `exit`.
    ///
    /// Returns the state to enter to start the walk: `template(0)`, or `exit` itself when
    /// `count` is zero.
    pub fn walk<T>(&mut self, template: T, direction: Direction, count: usize, exit: S) -> S
    where
        T: Fn(usize) -> S,
    {
        if count == 0 {
            return exit;
        }

        for i in 0..count {
            let state = template(i);
            let next = if i + 1 == count {
                exit.clone()
            } else {
                template(i + 1)
            };

            for symbol in self.symbols.clone() {
                self.push(state.clone(), symbol, symbol, direction, next.clone());
            }
        }

        template(0)
    }

    /// Emits a single rule that fires only when `symbol` is read, keeps it, moves and goes to
    /// `exit`.
    pub fn branch_on_symbol(&mut self, state: S, symbol: Symbol, direction: Direction, exit: S) {
        self.branch_write_then_move(state, symbol, symbol, direction, exit);
    }

    /// Like [`branch_on_symbol`](Self::branch_on_symbol) but overwrites the matched cell with
    /// `write`.
    pub fn branch_write_then_move(
        &mut self,
        state: S,
        symbol: Symbol,
        write: Symbol,
        direction: Direction,
        exit: S,
    ) {
        self.push(state, symbol, write, direction, exit);
    }

    /// Emits one rule per readable symbol, all writing `write`, moving and going to `exit`.
    pub fn write_then_move(&mut self, state: S, write: Symbol, direction: Direction, exit: S) {
        for symbol in self.symbols.clone() {
            self.push(state.clone(), symbol, write, direction, exit.clone());
        }
    }

    /// Number of actions emitted so far.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Freezes the emitted actions into a [`Definition`].
    pub fn build<F>(self, initial_state: S, final_states: F) -> Result<Definition<S>, MachineError>
    where
        F: IntoIterator<Item = S>,
    {
        Definition::new(initial_state, final_states, self.actions)
    }

    fn push(&mut self, state: S, read: Symbol, write: Symbol, direction: Direction, next_state: S) {
        self.actions.push(Action {
            state,
            read,
            write,
            direction,
            next_state,
        });
    }
}
