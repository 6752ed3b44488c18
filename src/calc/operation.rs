//! Built-in arithmetic operations

use super::outcome::Outcome;

/// Display color family of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationColor {
    Green,
    Red,
    Blue,
    Purple,
    Orange,
    /// Fallback for symbols that match no built-in operation
    Gray,
}

impl OperationColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationColor::Green => "green",
            OperationColor::Red => "red",
            OperationColor::Blue => "blue",
            OperationColor::Purple => "purple",
            OperationColor::Orange => "orange",
            OperationColor::Gray => "gray",
        }
    }

    /// CSS class for text in this color
    pub fn text_class(&self) -> String {
        format!("op-{}", self.as_str())
    }

    /// Color used when rendering a stored entry by its symbol
    pub fn for_symbol(symbol: &str) -> Self {
        Operation::by_symbol(symbol)
            .map(|op| op.color)
            .unwrap_or(OperationColor::Gray)
    }
}

/// A named binary arithmetic function with a display symbol
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub symbol: &'static str,
    pub color: OperationColor,
    evaluate: fn(u32, u32) -> Outcome,
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.symbol == other.symbol && self.color == other.color
    }
}

impl Operation {
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        color: OperationColor,
        evaluate: fn(u32, u32) -> Outcome,
    ) -> Self {
        Self {
            name,
            symbol,
            color,
            evaluate,
        }
    }

    /// Apply the operation to two operands
    pub fn evaluate(&self, a: u32, b: u32) -> Outcome {
        (self.evaluate)(a, b)
    }

    /// Look up a built-in operation by its symbol
    pub fn by_symbol(symbol: &str) -> Option<&'static Operation> {
        OPERATIONS.iter().find(|op| op.symbol == symbol)
    }
}

fn add(a: u32, b: u32) -> Outcome {
    Outcome::number(f64::from(a) + f64::from(b))
}

fn multiply(a: u32, b: u32) -> Outcome {
    Outcome::number(f64::from(a) * f64::from(b))
}

fn subtract(a: u32, b: u32) -> Outcome {
    Outcome::number(f64::from(a) - f64::from(b))
}

fn divide(a: u32, b: u32) -> Outcome {
    Outcome::quotient(f64::from(a), f64::from(b))
}

// Overflow collapses to the infinity sentinel via Outcome::number
fn power(a: u32, b: u32) -> Outcome {
    Outcome::number(f64::from(a).powf(f64::from(b)))
}

pub const ADD: Operation = Operation::new("Som", "+", OperationColor::Green, add);
pub const MULTIPLY: Operation =
    Operation::new("Vermenigvuldiging", "×", OperationColor::Red, multiply);
pub const SUBTRACT: Operation = Operation::new("Aftrekking", "-", OperationColor::Blue, subtract);
pub const DIVIDE: Operation = Operation::new("Deling", "÷", OperationColor::Purple, divide);
pub const POWER: Operation = Operation::new("Macht", "^", OperationColor::Orange, power);

/// All operations, in selection order
pub static OPERATIONS: [Operation; 5] = [ADD, MULTIPLY, SUBTRACT, DIVIDE, POWER];
