//! Core domain types for Codon.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod ids;

pub use ids::UserId;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Codec Errors
// ============================================================================

/// Error produced by input validation and codec routines.
///
/// Every fallible step of every calculator reports one of these variants, so
/// the conversation layer can re-prompt with a precise message instead of a
/// generic failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A digit is not valid in the given base.
    #[error("invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    /// Input length does not match what the operation requires.
    #[error("invalid length: expected {expected} digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A numeric parameter is outside its permitted range.
    #[error("value {value} is outside the allowed range {min}..={max}")]
    InvalidRange { value: f64, min: f64, max: f64 },

    /// An operation would divide by zero.
    #[error("division by zero: {operand} must not be zero")]
    DivisionByZero { operand: &'static str },

    /// Binary input is empty or contains characters other than '0' and '1'.
    #[error("expected a non-empty string of '0' and '1' characters")]
    MalformedBitString,
}

// ============================================================================
// Bit Strings
// ============================================================================

/// A non-empty string of '0' and '1' characters.
///
/// Codec routines accept this type instead of raw strings, so malformed binary
/// input is rejected once at the boundary rather than re-checked inside every
/// codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitString(String);

#[allow(clippy::len_without_is_empty)] // never empty by construction
impl BitString {
    /// Validate `raw` as binary input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CodecError> {
        let raw = raw.into();
        if raw.is_empty() || !raw.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(CodecError::MalformedBitString);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Count of set bits.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.0.bytes().filter(|&b| b == b'1').count()
    }

    /// Iterate bits most-significant first, '1' as `true`.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }

    /// A copy with every bit flipped.
    #[must_use]
    pub fn complemented(&self) -> Self {
        let flipped = self
            .0
            .bytes()
            .map(|b| if b == b'1' { '0' } else { '1' })
            .collect();
        Self(flipped)
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for BitString {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for BitString {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BitString> for String {
    fn from(value: BitString) -> Self {
        value.0
    }
}

impl std::ops::Deref for BitString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Digit Strings
// ============================================================================

/// A non-empty string of ASCII decimal digits.
///
/// Used wherever a calculator consumes a decimal number digit by digit and the
/// numeric value would lose leading zeros (barcodes, control numbers, QR
/// payloads).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitString(String);

#[allow(clippy::len_without_is_empty)] // never empty by construction
impl DigitString {
    /// Validate `raw` as a decimal digit sequence.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CodecError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CodecError::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_ascii_digit()) {
            return Err(CodecError::InvalidDigit {
                digit: bad,
                base: 10,
            });
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate digit values most-significant first.
    pub fn digits(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.bytes().map(|b| u32::from(b - b'0'))
    }
}

impl TryFrom<String> for DigitString {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for DigitString {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DigitString> for String {
    fn from(value: DigitString) -> Self {
        value.0
    }
}

impl std::ops::Deref for DigitString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DigitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Radix
// ============================================================================

/// A positional numeral system base, restricted to 2..=36.
///
/// The upper bound matches the digit alphabet 0-9 followed by A-Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Radix(u32);

impl Radix {
    pub const MIN: u32 = 2;
    pub const MAX: u32 = 36;

    /// The decimal base, the pivot of every conversion.
    pub const DECIMAL: Radix = Radix(10);

    pub fn new(base: u32) -> Result<Self, CodecError> {
        if (Self::MIN..=Self::MAX).contains(&base) {
            Ok(Self(base))
        } else {
            Err(CodecError::InvalidRange {
                value: f64::from(base),
                min: f64::from(Self::MIN),
                max: f64::from(Self::MAX),
            })
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Value of `digit` in this base, if valid.
    ///
    /// Letters are accepted in either case, matching `char::to_digit`.
    #[must_use]
    pub fn digit_value(self, digit: char) -> Option<u32> {
        digit.to_digit(self.0)
    }
}

impl TryFrom<u32> for Radix {
    type Error = CodecError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Radix> for u32 {
    fn from(value: Radix) -> Self {
        value.0
    }
}

impl std::fmt::Display for Radix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Tests
// ============================================================================
