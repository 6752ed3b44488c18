//! Expression core
//!
//! Pure arithmetic and random selection. This module must stay free of
//! storage, clock and DOM dependencies:
//! - Randomness comes in through a caller-supplied draw function
//! - Every operation is total (no panics, no errors on valid operands)

pub mod generator;
pub mod operation;
pub mod outcome;

pub use generator::{
    Expression, GenerateError, InitialValues, display_value, evaluate, generate, initial_values,
    random_number, random_value, select_operation,
};
pub use operation::{OPERATIONS, Operation, OperationColor};
pub use outcome::{INFINITY_SYMBOL, Outcome};
