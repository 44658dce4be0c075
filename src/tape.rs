//! This module defines the `Tape`, an unbounded bidirectional sequence of symbols with a
//! single read/write head.
//!
//! Cells live in a `VecDeque` so the tape grows at either end in amortized O(1). The `origin`
//! index remembers where position 0 sits inside the buffer; it shifts right every time a cell
//! is prepended, so positions left of the initial first symbol are negative.

use crate::types::{Direction, Symbol, BLANK_SYMBOL};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    /// Buffer index of position 0.
    origin: usize,
    /// Buffer index of the cell under the head.
    head: usize,
}

impl Tape {
    /// Creates a tape holding `symbols` left to right with the head on the first one.
    ///
    /// An empty input yields a single blank cell.
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut cells: VecDeque<Symbol> = symbols.into_iter().collect();
        if cells.is_empty() {
            cells.push_back(BLANK_SYMBOL);
        }

        Self {
            cells,
            origin: 0,
            head: 0,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: Symbol) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell, extending the tape with a blank cell when it walks off
    /// either end.
    pub fn move_head(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(BLANK_SYMBOL);
                    self.origin += 1;
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head == self.cells.len() {
                    self.cells.push_back(BLANK_SYMBOL);
                }
            }
            Direction::Stay => {}
        }
    }

    /// Offset of the head from the initial first cell. Negative once the head has moved
    /// left of it.
    pub fn position(&self) -> isize {
        self.head as isize - self.origin as isize
    }

    /// Position of the leftmost cell ever touched.
    pub fn leftmost(&self) -> isize {
        -(self.origin as isize)
    }

    /// Number of cells ever touched.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the symbol stored at `position`, or blank for cells never touched.
    pub fn get(&self, position: isize) -> Symbol {
        self.index_of(position)
            .map_or(BLANK_SYMBOL, |index| self.cells[index])
    }

    /// Returns `count` symbols starting at `position`, blank-filling untouched cells.
    pub fn symbols_from(&self, position: isize, count: usize) -> Vec<Symbol> {
        (0..count as isize).map(|i| self.get(position + i)).collect()
    }

    /// Returns every touched cell, leftmost first.
    pub fn to_sequence(&self) -> Vec<Symbol> {
        self.cells.iter().copied().collect()
    }

    fn index_of(&self, position: isize) -> Option<usize> {
        let index = position + self.origin as isize;
        (index >= 0 && (index as usize) < self.cells.len()).then_some(index as usize)
    }
}

/// Renders the cells as `|a|b|c|` with a `^` marker under the head on the next line.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = String::with_capacity(self.cells.len() * 2 + 1);
        line.push('|');
        for &symbol in &self.cells {
            line.push(symbol);
            line.push('|');
        }

        // Cell `i` is drawn at column `2i + 1`.
        let width = self.head * 2 + 2;
        writeln!(f, "{}", line)?;
        write!(f, "{:>width$}", "^", width = width)
    }
}
