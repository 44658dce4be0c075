//! Generator for ripple-carry binary adders expressed as a single-tape transition table.
//!
//! Tape layout for an `N`-bit adder, positions from the initial head:
//!
//! ```text
//! 0 .. N-1      operand A, most significant bit first
//! N .. 2N-1     operand B, most significant bit first
//! 2N .. 3N      result, N + 1 cells, most significant (carry-out) first
//! ```
//!
//! The machine seeks to the least significant bit of A, then runs one full-adder block per bit
//! from least to most significant. Each block remembers the A and B bits it has read in its
//! control state, walks to the result cell, reads the carry left there by the previous block
//! (blank for the first one), writes the sum bit and leaves the carry-out in the cell to its
//! left. A seek phase brings the head back to the next bit of A. The last block stays on the
//! carry-out cell and accepts, so the head ends on the first result digit.

use crate::definition::Definition;
use crate::tape::Tape;
use crate::templates::TableBuilder;
use crate::types::{Direction, MachineError, Symbol, BLANK_SYMBOL};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The largest supported operand width; results must fit in a `u64`.
pub const MAX_BITS: usize = 63;

/// Symbols the adder reads besides the blank.
pub const ALPHABET: [Symbol; 2] = ['0', '1'];

/// A binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    pub fn symbol(self) -> Symbol {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        match symbol {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    fn from_value(value: u8) -> Self {
        if value & 1 == 0 {
            Bit::Zero
        } else {
            Bit::One
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Where a full-adder block is in its processing of one bit.
///
/// `carry: None` means the result cell was blank, which only happens for the least significant
/// bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// On the A bit, about to branch on it.
    ReadA,
    /// Walking from A to B; `step` is the walk offset and the last one sits on B.
    ToB { a: Bit, step: usize },
    /// Walking from B to the result cell; the last step sits on it.
    ToResult { a: Bit, b: Bit, step: usize },
    /// Sum written, head on the carry-out cell.
    WriteCarry { a: Bit, b: Bit, carry: Option<Bit> },
}

/// Control state identifier of a generated adder.
///
/// The table has a single flat namespace, so every component that disambiguates a state lives
/// in the value itself: the bit being processed, the branch taken so far and the walk offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdderState {
    /// Moving the head to the A bit of `bit`.
    Seek { bit: usize, step: usize },
    /// Inside the full-adder block of `bit`.
    Add { bit: usize, phase: Phase },
    /// The single accepting state.
    Accept,
}

impl fmt::Display for AdderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdderState::Seek { bit, step } => write!(f, "seek[{}]@{}", bit, step),
            AdderState::Add { bit, phase } => match phase {
                Phase::ReadA => write!(f, "add[{}] ?+? C=?", bit),
                Phase::ToB { a, step } => write!(f, "add[{}] {}+? C=? @{}", bit, a, step),
                Phase::ToResult { a, b, step } => {
                    write!(f, "add[{}] {}+{} C=? @{}", bit, a, b, step)
                }
                Phase::WriteCarry { a, b, carry } => {
                    let carry = carry.map_or(BLANK_SYMBOL, Bit::symbol);
                    write!(f, "add[{}] {}+{} C={} carry", bit, a, b, carry)
                }
            },
            AdderState::Accept => f.write_str("accept"),
        }
    }
}

const FIRST_CARRIES: [Option<Bit>; 3] = [None, Some(Bit::Zero), Some(Bit::One)];
const CARRIES: [Option<Bit>; 2] = [Some(Bit::Zero), Some(Bit::One)];

/// Definition produced by [`binary_adder`].
pub type AdderDefinition = Definition<AdderState>;

/// Builds the transition table of an unsigned `bits`-bit adder.
///
/// # Returns
///
/// * `Ok(AdderDefinition)` with `24N² + 29N + 13` transitions.
/// * `Err(MachineError::InvalidBitWidth)` unless `1 <= bits <= MAX_BITS`.
pub fn binary_adder(bits: usize) -> Result<AdderDefinition, MachineError> {
    check_width(bits)?;

    let mut builder = TableBuilder::new(&ALPHABET);

    let first_block = AdderState::Add {
        bit: 0,
        phase: Phase::ReadA,
    };
    let initial_state = builder.walk(
        |step| AdderState::Seek { bit: 0, step },
        Direction::Right,
        bits - 1,
        first_block,
    );

    for bit in 0..bits {
        let (last_move, exit) = if bit + 1 == bits {
            (Direction::Stay, AdderState::Accept)
        } else {
            let next_block = AdderState::Add {
                bit: bit + 1,
                phase: Phase::ReadA,
            };
            // From the cell left of the carry-out of `bit` back to the A bit of `bit + 1`.
            let seek = builder.walk(
                |step| AdderState::Seek { bit: bit + 1, step },
                Direction::Left,
                2 * bits,
                next_block,
            );
            (Direction::Left, seek)
        };

        full_adder(&mut builder, bits, bit, last_move, exit);
    }

    let definition = builder.build(initial_state, [AdderState::Accept])?;
    debug!(
        "Generated {}-bit adder: {} transitions, {} states",
        bits,
        definition.len(),
        definition.states().len()
    );

    Ok(definition)
}

/// Emits the full-adder block for `bit`, entered on its A bit in `Add { bit, ReadA }`.
///
/// Leaves the head one cell left of the carry-out cell (or on it when `last_move` is `Stay`)
/// in state `exit`.
fn full_adder(
    builder: &mut TableBuilder<AdderState>,
    bits: usize,
    bit: usize,
    last_move: Direction,
    exit: AdderState,
) {
    let state = |phase: Phase| AdderState::Add { bit, phase };

    // A blank result cell only shows up before the first carry has been written.
    let carries: &[Option<Bit>] = if bit == 0 {
        &FIRST_CARRIES
    } else {
        &CARRIES
    };

    for a in Bit::ALL {
        // A to B is `bits` cells; the branch takes the first one.
        let on_b = state(Phase::ToB { a, step: bits - 1 });
        let to_b = builder.walk(
            |step| state(Phase::ToB { a, step }),
            Direction::Right,
            bits - 1,
            on_b,
        );
        builder.branch_on_symbol(state(Phase::ReadA), a.symbol(), Direction::Right, to_b);

        for b in Bit::ALL {
            // B to the result cell is `bits + 1` cells.
            let on_result = state(Phase::ToResult { a, b, step: bits });
            let to_result = builder.walk(
                |step| state(Phase::ToResult { a, b, step }),
                Direction::Right,
                bits,
                on_result,
            );
            builder.branch_on_symbol(on_b, b.symbol(), Direction::Right, to_result);

            for &carry in carries {
                let (sum, carry_out) = add_bits(a, b, carry.unwrap_or(Bit::Zero));
                let write_carry = state(Phase::WriteCarry { a, b, carry });
                let carry_symbol = carry.map_or(BLANK_SYMBOL, Bit::symbol);

                builder.branch_write_then_move(
                    on_result,
                    carry_symbol,
                    sum.symbol(),
                    Direction::Left,
                    write_carry,
                );
                builder.write_then_move(write_carry, carry_out.symbol(), last_move, exit);
            }
        }
    }
}

/// One row of the full-adder truth table: `(sum, carry_out)`.
fn add_bits(a: Bit, b: Bit, carry: Bit) -> (Bit, Bit) {
    let total = a.value() + b.value() + carry.value();
    (Bit::from_value(total), Bit::from_value(total >> 1))
}

fn check_width(bits: usize) -> Result<(), MachineError> {
    if bits == 0 || bits > MAX_BITS {
        return Err(MachineError::InvalidBitWidth(bits));
    }

    Ok(())
}

/// Lays out the input tape for `a + b`: both operands on `bits` digits, most significant first.
pub fn input_tape(bits: usize, a: u64, b: u64) -> Result<Vec<Symbol>, MachineError> {
    check_width(bits)?;

    let mut symbols = Vec::with_capacity(2 * bits);
    for operand in [a, b] {
        if operand >> bits != 0 {
            return Err(MachineError::OperandOverflow { operand, bits });
        }

        symbols.extend(
            (0..bits)
                .rev()
                .map(|i| Bit::from_value((operand >> i) as u8).symbol()),
        );
    }

    Ok(symbols)
}

/// Reads the `bits + 1` result cells starting at position `2 * bits`.
///
/// Returns `None` when any of them is not a binary digit.
pub fn read_result(tape: &Tape, bits: usize) -> Option<u64> {
    tape.symbols_from(2 * bits as isize, bits + 1)
        .into_iter()
        .try_fold(0u64, |acc, symbol| {
            Bit::from_symbol(symbol).map(|bit| (acc << 1) | u64::from(bit.value()))
        })
}
