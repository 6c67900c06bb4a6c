//! Positional numeral system conversion.
//!
//! Conversion always pivots through base 10: the source digits fold into an
//! arbitrary-precision integer, which is then repeatedly divided by the
//! target base. Every elementary step lands in the work trace.

use codon_types::{CodecError, Radix};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Result of a base conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Digits of the number in the target base, most-significant first.
    pub digits: String,
    /// Work shown, one line per elementary step.
    pub trace: Vec<String>,
}

/// Convert `digits` from base `from` to base `to`.
///
/// Digits above 9 use the letters A-Z and are accepted in either case.
/// Precision is unbounded, so inputs far beyond `u64` convert exactly.
pub fn convert(digits: &str, from: Radix, to: Radix) -> Result<Conversion, CodecError> {
    if digits.is_empty() {
        return Err(CodecError::InvalidLength {
            expected: 1,
            actual: 0,
        });
    }

    let mut trace = Vec::new();
    let decimal = to_decimal(digits, from, &mut trace)?;

    if to == Radix::DECIMAL {
        return Ok(Conversion {
            digits: decimal.to_string(),
            trace,
        });
    }

    trace.push(String::new());
    trace.push(format!("Conversion from base 10 to base {to}:"));

    if decimal.is_zero() {
        return Ok(Conversion {
            digits: "0".to_string(),
            trace,
        });
    }

    let to_value = to.get();
    let mut n = decimal;
    let mut out = Vec::new();
    while !n.is_zero() {
        let quotient = &n / to_value;
        let remainder = (&n % to_value).to_u32().unwrap_or(0);
        let digit = digit_char(remainder);
        trace.push(format!(
            "  {n} ÷ {to_value} = {quotient} (remainder {remainder} → '{digit}')"
        ));
        out.push(digit);
        n = quotient;
    }
    out.reverse();
    let digits: String = out.into_iter().collect();
    trace.push(format!("  Result: {digits}"));

    Ok(Conversion { digits, trace })
}

/// Fold the source digits into a decimal value, tracing one positional term
/// per digit when the source base is not already 10.
fn to_decimal(digits: &str, from: Radix, trace: &mut Vec<String>) -> Result<BigUint, CodecError> {
    let from_value = from.get();

    if from == Radix::DECIMAL {
        let mut acc = BigUint::zero();
        for c in digits.chars() {
            let value = from.digit_value(c).ok_or(CodecError::InvalidDigit {
                digit: c,
                base: from_value,
            })?;
            acc = acc * from_value + value;
        }
        trace.push(format!("Original number in base 10: {acc}"));
        return Ok(acc);
    }

    trace.push(format!("Conversion from base {from_value} to base 10:"));

    let count = digits.chars().count();
    let mut weight = BigUint::one();
    for _ in 1..count {
        weight *= from_value;
    }

    let mut acc = BigUint::zero();
    for (i, c) in digits.chars().enumerate() {
        let value = from.digit_value(c).ok_or(CodecError::InvalidDigit {
            digit: c,
            base: from_value,
        })?;
        let term = &weight * value;
        let power = count - 1 - i;
        trace.push(format!(
            "  {c} × {from_value}^{power} = {value} × {weight} = {term}"
        ));
        acc += &term;
        if i + 1 < count {
            weight /= from_value;
        }
    }
    trace.push(format!("  Total: {acc}"));

    Ok(acc)
}

/// Digit character for a remainder below 36, with 10-35 as A-Z.
fn digit_char(value: u32) -> char {
    match char::from_digit(value, 36) {
        Some(c) => c.to_ascii_uppercase(),
        None => '?',
    }
}
