//! Error-detection codes over binary sequences and decimal numbers.

use codon_types::{BitString, CodecError, DigitString};

// ============================================================================
// Parity
// ============================================================================

/// Result of appending an even-parity bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityChecked {
    /// Data with the parity bit appended.
    pub encoded: String,
    /// Count of set bits in the data.
    pub ones: usize,
    /// The appended bit.
    pub parity_bit: char,
}

/// Append an even-parity bit to `data`.
#[must_use]
pub fn parity_check(data: &BitString) -> ParityChecked {
    let ones = data.ones();
    let parity_bit = if ones % 2 == 0 { '0' } else { '1' };
    ParityChecked {
        encoded: format!("{data}{parity_bit}"),
        ones,
        parity_bit,
    }
}

/// One block of a parity-framed sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityBlock {
    /// The raw block, possibly shorter than the block size at the tail.
    pub block: String,
    /// Count of set bits in the block.
    pub ones: usize,
    /// The appended bit.
    pub parity_bit: char,
    /// Block with its parity bit appended.
    pub encoded: String,
}

/// Split `data` into `block_size`-bit blocks and append an even-parity bit
/// to each. The final block keeps its natural length when the input does not
/// divide evenly.
pub fn block_parity(data: &BitString, block_size: usize) -> Result<Vec<ParityBlock>, CodecError> {
    if block_size == 0 {
        return Err(CodecError::DivisionByZero {
            operand: "block size",
        });
    }

    let blocks = data
        .as_bytes()
        .chunks(block_size)
        .map(|chunk| {
            let block = String::from_utf8_lossy(chunk).into_owned();
            let ones = chunk.iter().filter(|&&b| b == b'1').count();
            let parity_bit = if ones % 2 == 0 { '0' } else { '1' };
            let encoded = format!("{block}{parity_bit}");
            ParityBlock {
                block,
                ones,
                parity_bit,
                encoded,
            }
        })
        .collect();

    Ok(blocks)
}

// ============================================================================
// Constant Weight
// ============================================================================

/// Result of constant-weight encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantWeight {
    /// Data with the check bits appended.
    pub encoded: String,
    /// Count of set bits in the data before padding.
    pub current_weight: usize,
    /// The appended check bits.
    pub check_bits: String,
}

/// Pad `data` with check bits toward the requested weight.
///
/// Missing ones are appended as '1' bits. When the input already carries
/// more ones than `weight`, the surplus count is appended as '0' bits, which
/// flags the overweight input without changing its ones count. An exact
/// match appends a single '0'.
#[must_use]
pub fn constant_weight(data: &BitString, weight: usize) -> ConstantWeight {
    let current_weight = data.ones();
    let check_bits = if current_weight > weight {
        "0".repeat(current_weight - weight)
    } else if current_weight < weight {
        "1".repeat(weight - current_weight)
    } else {
        "0".to_string()
    };
    ConstantWeight {
        encoded: format!("{data}{check_bits}"),
        current_weight,
        check_bits,
    }
}

// ============================================================================
// Inverse Code
// ============================================================================

/// Result of inverse-code encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseCode {
    /// Data with the check block appended.
    pub encoded: String,
    /// Count of set bits in the data.
    pub ones: usize,
    /// The appended check block.
    pub check_bits: String,
}

/// Append the inverse-code check block.
///
/// An even ones count repeats the data verbatim; an odd count appends the
/// bitwise complement.
#[must_use]
pub fn inverse_code(data: &BitString) -> InverseCode {
    let ones = data.ones();
    let check_bits = if ones % 2 == 0 {
        data.as_str().to_string()
    } else {
        data.complemented().into_inner()
    };
    InverseCode {
        encoded: format!("{data}{check_bits}"),
        ones,
        check_bits,
    }
}

// ============================================================================
// Control Number
// ============================================================================

/// Result of a weighted control number computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNumber {
    /// The weighted sum reduced by the modulus.
    pub control_digit: u64,
    /// Sum of digit × weight over all positions.
    pub weighted_sum: u64,
    /// Weights actually applied, one per digit.
    pub weights: Vec<u64>,
}

/// Weighted checksum of a decimal number.
///
/// Weights default to 1, 2, 3, ... aligned with the most significant digit.
/// A custom weight list is padded with 1 or truncated to the digit count.
pub fn control_number(
    number: &DigitString,
    weights: Option<Vec<u64>>,
    modulus: u64,
) -> Result<ControlNumber, CodecError> {
    if modulus == 0 {
        return Err(CodecError::DivisionByZero { operand: "modulus" });
    }

    let count = number.len();
    let mut weights = weights.unwrap_or_else(|| (1..=count as u64).collect());
    while weights.len() < count {
        weights.push(1);
    }
    weights.truncate(count);

    let weighted_sum: u64 = number
        .digits()
        .zip(weights.iter().copied())
        .map(|(digit, weight)| u64::from(digit) * weight)
        .sum();

    Ok(ControlNumber {
        control_digit: weighted_sum % modulus,
        weighted_sum,
        weights,
    })
}
