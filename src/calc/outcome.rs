//! Result values of an evaluated operation
//!
//! Stored results must stay readable by older saves, so the JSON shape is
//! fixed: plain numbers for exact results, a two-decimal string for
//! quotients and `"∞"` for the division-by-zero sentinel.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display symbol for the infinity sentinel
pub const INFINITY_SYMBOL: &str = "∞";

/// Largest magnitude rendered without exponent notation
const PLAIN_NUMBER_LIMIT: f64 = 1e21;

/// Largest integer an f64 holds exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Outcome of a single operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Exact numeric result (sum, product, difference, power)
    Number(f64),
    /// Quotient rounded to two decimals
    Decimal(f64),
    /// Sentinel for results that have no finite value
    Infinity,
}

impl Outcome {
    /// Wrap a numeric result, mapping non-finite values to the sentinel
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            Outcome::Number(value)
        } else {
            Outcome::Infinity
        }
    }

    /// Divide with a zero guard, rounding to two decimals
    pub fn quotient(dividend: f64, divisor: f64) -> Self {
        if divisor == 0.0 {
            return Outcome::Infinity;
        }
        let q = dividend / divisor;
        if !q.is_finite() {
            return Outcome::Infinity;
        }
        Outcome::Decimal(round2(q))
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Outcome::Infinity)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a number the way a browser would print it: plain digits below
/// 1e21, exponent form with a signed exponent above (`1e+22`).
pub fn format_number(value: f64) -> String {
    if value.abs() < PLAIN_NUMBER_LIMIT {
        return format!("{}", value);
    }
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Number(v) => f.write_str(&format_number(v)),
            Outcome::Decimal(v) => write!(f, "{:.2}", v),
            Outcome::Infinity => f.write_str(INFINITY_SYMBOL),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Outcome::Number(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(v as i64)
            }
            Outcome::Number(v) => serializer.serialize_f64(v),
            Outcome::Decimal(v) => serializer.serialize_str(&format!("{:.2}", v)),
            Outcome::Infinity => serializer.serialize_str(INFINITY_SYMBOL),
        }
    }
}

struct OutcomeVisitor;

impl<'de> Visitor<'de> for OutcomeVisitor {
    type Value = Outcome;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a decimal string or \"∞\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Outcome, E> {
        Ok(Outcome::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Outcome, E> {
        Ok(Outcome::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Outcome, E> {
        Ok(Outcome::number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Outcome, E> {
        if v == INFINITY_SYMBOL {
            return Ok(Outcome::Infinity);
        }
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(|x| Outcome::Decimal(round2(x)))
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    // JSON.stringify writes an infinite power result as null
    fn visit_unit<E: de::Error>(self) -> Result<Outcome, E> {
        Ok(Outcome::Infinity)
    }

    fn visit_none<E: de::Error>(self) -> Result<Outcome, E> {
        Ok(Outcome::Infinity)
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OutcomeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotient_rounds_to_two_decimals() {
        assert_eq!(Outcome::quotient(10.0, 3.0), Outcome::Decimal(3.33));
        assert_eq!(Outcome::quotient(2.0, 3.0), Outcome::Decimal(0.67));
        assert_eq!(Outcome::quotient(5.0, 2.0).to_string(), "2.50");
        assert_eq!(Outcome::quotient(4.0, 2.0).to_string(), "2.00");
    }

    #[test]
    fn test_quotient_zero_divisor_is_sentinel() {
        for a in [0.0, 1.0, 7.0, 1e9] {
            assert_eq!(Outcome::quotient(a, 0.0), Outcome::Infinity);
        }
        assert_eq!(Outcome::Infinity.to_string(), "∞");
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Outcome::Number(8.0).to_string(), "8");
        assert_eq!(Outcome::Number(-3.0).to_string(), "-3");
        assert_eq!(Outcome::Number(1e200).to_string(), "1e+200");
        assert_eq!(Outcome::Number(1e22).to_string(), "1e+22");
        assert_eq!(Outcome::Number(1.5e25).to_string(), "1.5e+25");
        assert_eq!(Outcome::Number(-2e30).to_string(), "-2e+30");
        assert_eq!(Outcome::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Outcome::number(f64::INFINITY), Outcome::Infinity);
        assert_eq!(Outcome::number(f64::NAN), Outcome::Infinity);
    }

    #[test]
    fn test_json_shape() {
        assert_eq!(serde_json::to_string(&Outcome::Number(8.0)).unwrap(), "8");
        assert_eq!(serde_json::to_string(&Outcome::Decimal(2.5)).unwrap(), "\"2.50\"");
        assert_eq!(serde_json::to_string(&Outcome::Infinity).unwrap(), "\"∞\"");
        assert_eq!(serde_json::to_string(&Outcome::Number(1e200)).unwrap(), "1e+200");
    }

    #[test]
    fn test_json_parse_legacy_values() {
        let parsed: Vec<Outcome> =
            serde_json::from_str(r#"[8, -2, 2.5, "0.33", "∞", null]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Outcome::Number(8.0),
                Outcome::Number(-2.0),
                Outcome::Number(2.5),
                Outcome::Decimal(0.33),
                Outcome::Infinity,
                Outcome::Infinity,
            ]
        );
    }

    #[test]
    fn test_json_rejects_garbage_string() {
        assert!(serde_json::from_str::<Outcome>(r#""abc""#).is_err());
        assert!(serde_json::from_str::<Outcome>("[1]").is_err());
    }
}
