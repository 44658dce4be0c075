//! This crate provides an abstract single-tape Turing machine and a generator that synthesizes
//! the transition table of an N-bit ripple-carry binary adder from a handful of reusable
//! templates. It includes modules for the tape, immutable machine definitions, the execution
//! engine, the template primitives, the adder generator and an optional definition analyzer.

pub mod adder;
pub mod analyzer;
pub mod definition;
pub mod machine;
pub mod tape;
pub mod templates;
pub mod types;

/// Re-exports the adder generator, its state identifiers and tape helpers.
pub use adder::{binary_adder, input_tape, read_result, AdderDefinition, AdderState, Bit, Phase};
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the definition types.
pub use definition::{Action, Definition, DefinitionDocument, Transition};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the `TableBuilder` used to compose definitions from templates.
pub use templates::TableBuilder;
/// Re-exports the shared types.
pub use types::{Direction, MachineError, State, Status, Symbol, BLANK_SYMBOL};
