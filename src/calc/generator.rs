//! Random expression generation
//!
//! The random source is any `FnMut() -> f64` yielding values in `[0, 1)`.
//! Out-of-range draws are clamped so selection never indexes past the end.

use super::operation::Operation;
use super::outcome::Outcome;

/// Smallest value `random_value` returns
pub const MIN_RANDOM_VALUE: f64 = 0.0001;

/// Largest f64 strictly below 1.0
const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Errors from invalid generator input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("maximum bound must be at least 1, got {0}")]
    InvalidBound(u32),

    #[error("operation list is empty")]
    NoOperations,
}

/// A generated, evaluated expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression {
    /// Draw that selected the operation
    pub random_value: f64,
    pub operand_a: u32,
    pub operand_b: u32,
    pub operation: Operation,
    pub result: Outcome,
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operand_a, self.operation.symbol, self.operand_b, self.result
        )
    }
}

/// Startup values shown before the first generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialValues {
    pub random_value: f64,
    pub operand_a: u32,
    pub operand_b: u32,
}

/// Clamp a draw into `[0, 1)`; NaN counts as 0
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, LARGEST_BELOW_ONE)
}

fn scaled_index(value: f64, len: usize) -> usize {
    ((unit(value) * len as f64).floor() as usize).min(len - 1)
}

/// Draw a number in `[1, max]`
pub fn random_number(
    max: u32,
    mut random: impl FnMut() -> f64,
) -> Result<u32, GenerateError> {
    if max < 1 {
        return Err(GenerateError::InvalidBound(max));
    }
    Ok(scaled_index(random(), max as usize) as u32 + 1)
}

/// Pick the operation at `floor(random_value * len)`
pub fn select_operation(
    operations: &[Operation],
    random_value: f64,
) -> Result<&Operation, GenerateError> {
    if operations.is_empty() {
        return Err(GenerateError::NoOperations);
    }
    Ok(&operations[scaled_index(random_value, operations.len())])
}

/// A draw for display purposes, never below `MIN_RANDOM_VALUE`
pub fn random_value(mut random: impl FnMut() -> f64) -> f64 {
    unit(random()).max(MIN_RANDOM_VALUE)
}

/// Dice number shown for a draw: 1..=1000
pub fn display_value(random_value: f64) -> u32 {
    (unit(random_value) * 1000.0).floor() as u32 + 1
}

/// Values for the first screen, before anything is recorded
pub fn initial_values(
    max: u32,
    mut random: impl FnMut() -> f64,
) -> Result<InitialValues, GenerateError> {
    let random_value = random_value(&mut random);
    let operand_a = random_number(max, &mut random)?;
    let operand_b = random_number(max, &mut random)?;
    Ok(InitialValues {
        random_value,
        operand_a,
        operand_b,
    })
}

/// Evaluate fixed operands with the operation a draw selects
pub fn evaluate(
    operations: &[Operation],
    random_value: f64,
    operand_a: u32,
    operand_b: u32,
) -> Result<Expression, GenerateError> {
    let operation = *select_operation(operations, random_value)?;
    Ok(Expression {
        random_value,
        operand_a,
        operand_b,
        operation,
        result: operation.evaluate(operand_a, operand_b),
    })
}

/// Draw an operation and two operands in `[1, max_bound]`, then evaluate.
///
/// The operation draw comes first, then operand a, then operand b.
pub fn generate(
    max_bound: u32,
    operations: &[Operation],
    mut random: impl FnMut() -> f64,
) -> Result<Expression, GenerateError> {
    if max_bound < 1 {
        return Err(GenerateError::InvalidBound(max_bound));
    }
    if operations.is_empty() {
        return Err(GenerateError::NoOperations);
    }

    let draw = random();
    let operand_a = random_number(max_bound, &mut random)?;
    let operand_b = random_number(max_bound, &mut random)?;
    let expression = evaluate(operations, unit(draw), operand_a, operand_b)?;

    log::debug!("Generated {}", expression);
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::operation::{ADD, DIVIDE, OPERATIONS, POWER};
    use proptest::prelude::*;

    /// Replays a fixed list of draws
    fn draws(values: &[f64]) -> impl FnMut() -> f64 + '_ {
        let mut i = 0;
        move || {
            let v = values[i % values.len()];
            i += 1;
            v
        }
    }

    #[test]
    fn test_generate_minimal_draws() {
        let expr = generate(10, &[ADD], || 0.0).unwrap();
        assert_eq!(expr.operand_a, 1);
        assert_eq!(expr.operand_b, 1);
        assert_eq!(expr.operation, ADD);
        assert_eq!(expr.result, Outcome::Number(2.0));
        assert_eq!(expr.to_string(), "1 + 1 = 2");
    }

    #[test]
    fn test_generate_draw_order() {
        // operation 0.7 -> index 3 (Deling), a = 5, b = 10
        let expr = generate(10, &OPERATIONS, draws(&[0.7, 0.45, 0.99])).unwrap();
        assert_eq!(expr.operation, DIVIDE);
        assert_eq!(expr.operand_a, 5);
        assert_eq!(expr.operand_b, 10);
        assert_eq!(expr.result, Outcome::Decimal(0.5));
        assert_eq!(expr.random_value, 0.7);
    }

    #[test]
    fn test_generate_rejects_bad_input() {
        assert_eq!(
            generate(0, &OPERATIONS, || 0.5),
            Err(GenerateError::InvalidBound(0))
        );
        assert_eq!(generate(10, &[], || 0.5), Err(GenerateError::NoOperations));
    }

    #[test]
    fn test_out_of_range_draws_are_clamped() {
        assert_eq!(select_operation(&OPERATIONS, 1.0).unwrap(), &POWER);
        assert_eq!(select_operation(&OPERATIONS, 7.5).unwrap(), &POWER);
        assert_eq!(select_operation(&OPERATIONS, -1.0).unwrap(), &ADD);
        assert_eq!(select_operation(&OPERATIONS, f64::NAN).unwrap(), &ADD);
        assert_eq!(random_number(10, || 1.0).unwrap(), 10);
    }

    #[test]
    fn test_random_value_floor() {
        assert_eq!(random_value(|| 0.0), MIN_RANDOM_VALUE);
        assert_eq!(random_value(|| 0.5), 0.5);
        assert_eq!(display_value(0.0001), 1);
        assert_eq!(display_value(0.9995), 1000);
    }

    #[test]
    fn test_initial_values() {
        let init = initial_values(10, draws(&[0.25, 0.0, 0.95])).unwrap();
        assert_eq!(init.random_value, 0.25);
        assert_eq!(init.operand_a, 1);
        assert_eq!(init.operand_b, 10);
        let expr = evaluate(&OPERATIONS, init.random_value, init.operand_a, init.operand_b)
            .unwrap();
        assert_eq!(expr.to_string(), "1 × 10 = 10");
    }

    proptest! {
        #[test]
        fn prop_operands_within_bound(max in 1u32..=1000, a in 0.0f64..1.0, b in 0.0f64..1.0, op in 0.0f64..1.0) {
            let values = [op, a, b];
            let expr = generate(max, &OPERATIONS, draws(&values)).unwrap();
            prop_assert!((1..=max).contains(&expr.operand_a));
            prop_assert!((1..=max).contains(&expr.operand_b));
        }

        #[test]
        fn prop_index_is_floor_of_scaled_draw(v in 0.0f64..1.0, len in 1usize..=16) {
            let ops: Vec<Operation> = OPERATIONS.iter().copied().cycle().take(len).collect();
            let chosen = select_operation(&ops, v).unwrap();
            let expected = (v * len as f64).floor() as usize;
            prop_assert!(expected < len);
            prop_assert!(std::ptr::eq(chosen, &ops[expected]));
        }
    }
}
