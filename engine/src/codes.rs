//! Error-control flows: detection codes, Hamming coding and the redundancy
//! calculator.

use codon_codecs::{checksum, hamming, redundancy};
use codon_session::Step;
use codon_types::BitString;

use crate::{Outcome, input};

pub(crate) const PROMPT_DATA_BITS: &str = "Enter the data bits (0 and 1 only):";
pub(crate) const PROMPT_HAMMING_RECEIVED: &str = "Enter the received block (0 and 1 only):";
pub(crate) const PROMPT_WEIGHT: &str = "Enter the target weight (0 or more):";
pub(crate) const PROMPT_CONTROL_DIGITS: &str = "Enter the number (decimal digits):";
pub(crate) const PROMPT_TOTAL: &str = "How many combinations does the code allow in total?";
pub(crate) const PROMPT_USED: &str = "How many combinations are actually used?";

const DEFAULT_MODULUS: u64 = 9;

// ============================================================================
// Detection codes
// ============================================================================

pub(crate) fn parity(input: &str) -> Outcome {
    let bits = match input::parse_bits(input) {
        Ok(bits) => bits,
        Err(reason) => return Outcome::reject(Step::ParityAwaitBits, &reason, PROMPT_DATA_BITS),
    };
    let result = checksum::parity_check(&bits);
    Outcome::finish(vec![
        format!("Ones count: {}", result.ones),
        format!("Parity bit: {}", result.parity_bit),
        format!("Encoded: {}", result.encoded),
    ])
}

pub(crate) fn constant_weight_bits(input: &str) -> Outcome {
    match input::parse_bits(input) {
        Ok(bits) => Outcome::new(
            Step::ConstWeightAwaitTarget { bits },
            vec![PROMPT_WEIGHT.to_string()],
        ),
        Err(reason) => Outcome::reject(Step::ConstWeightAwaitBits, &reason, PROMPT_DATA_BITS),
    }
}

pub(crate) fn constant_weight_target(bits: &BitString, input: &str) -> Outcome {
    let weight = match input::parse_usize(input) {
        Ok(weight) => weight,
        Err(reason) => {
            return Outcome::reject(
                Step::ConstWeightAwaitTarget { bits: bits.clone() },
                &reason,
                PROMPT_WEIGHT,
            );
        }
    };
    let result = checksum::constant_weight(bits, weight);
    Outcome::finish(vec![
        format!("Current weight: {}", result.current_weight),
        format!("Check bits: {}", result.check_bits),
        format!("Encoded: {}", result.encoded),
    ])
}

pub(crate) fn inverse(input: &str) -> Outcome {
    let bits = match input::parse_bits(input) {
        Ok(bits) => bits,
        Err(reason) => return Outcome::reject(Step::InverseAwaitBits, &reason, PROMPT_DATA_BITS),
    };
    let result = checksum::inverse_code(&bits);
    Outcome::finish(vec![
        format!("Ones count: {}", result.ones),
        format!("Check block: {}", result.check_bits),
        format!("Encoded: {}", result.encoded),
    ])
}

pub(crate) fn control_number(input: &str) -> Outcome {
    let digits = match input::parse_digits(input) {
        Ok(digits) => digits,
        Err(reason) => {
            return Outcome::reject(Step::ControlNumberAwaitDigits, &reason, PROMPT_CONTROL_DIGITS);
        }
    };
    match checksum::control_number(&digits, None, DEFAULT_MODULUS) {
        Ok(result) => {
            let weights: Vec<String> = result.weights.iter().map(ToString::to_string).collect();
            Outcome::finish(vec![
                format!("Weights: {}", weights.join(", ")),
                format!("Weighted sum: {}", result.weighted_sum),
                format!(
                    "Control number: {} (mod {DEFAULT_MODULUS})",
                    result.control_digit
                ),
            ])
        }
        Err(err) => Outcome::reject(
            Step::ControlNumberAwaitDigits,
            &err.to_string(),
            PROMPT_CONTROL_DIGITS,
        ),
    }
}

// ============================================================================
// Hamming code
// ============================================================================

pub(crate) fn hamming_encode(input: &str) -> Outcome {
    let bits = match input::parse_bits(input) {
        Ok(bits) => bits,
        Err(reason) => return Outcome::reject(Step::HammingAwaitData, &reason, PROMPT_DATA_BITS),
    };
    let result = hamming::encode(&bits);
    Outcome::finish(vec![
        format!("Parity bits: {}", result.parity_bits),
        format!("Total length: {}", result.total_len),
        format!("Encoded: {}", result.code),
    ])
}

pub(crate) fn hamming_decode(input: &str) -> Outcome {
    let bits = match input::parse_bits(input) {
        Ok(bits) => bits,
        Err(reason) => {
            return Outcome::reject(Step::HammingAwaitReceived, &reason, PROMPT_HAMMING_RECEIVED);
        }
    };
    let result = hamming::decode(&bits);
    let mut lines = Vec::new();
    if result.error_position == 0 {
        lines.push("No error detected.".to_string());
    } else if result.error_position <= bits.len() {
        lines.push(format!(
            "Error at position {}; flipped that bit.",
            result.error_position
        ));
        lines.push(format!("Corrected: {}", result.corrected));
    } else {
        lines.push(format!(
            "Parity checks point at position {}, which is outside the block; nothing changed.",
            result.error_position
        ));
    }
    lines.push(format!("Data bits: {}", result.data));
    Outcome::finish(lines)
}

// ============================================================================
// Redundancy
// ============================================================================

pub(crate) fn redundancy_total(input: &str) -> Outcome {
    let total = match input::parse_u64(input) {
        Ok(total) => total,
        Err(reason) => return Outcome::reject(Step::RedundancyAwaitTotal, &reason, PROMPT_TOTAL),
    };
    if total == 0 {
        return Outcome::reject(
            Step::RedundancyAwaitTotal,
            "the total must be at least 1",
            PROMPT_TOTAL,
        );
    }
    Outcome::new(
        Step::RedundancyAwaitUsed { total },
        vec![PROMPT_USED.to_string()],
    )
}

pub(crate) fn redundancy_used(total: u64, input: &str) -> Outcome {
    let used = match input::parse_u64(input) {
        Ok(used) => used,
        Err(reason) => {
            return Outcome::reject(Step::RedundancyAwaitUsed { total }, &reason, PROMPT_USED);
        }
    };
    match redundancy::redundancy(total, used) {
        Ok(result) => Outcome::finish(vec![
            format!("Unused combinations: {}", result.unused),
            format!("Redundancy: {:.2}%", result.percent),
        ]),
        Err(err) => Outcome::reject(
            Step::RedundancyAwaitUsed { total },
            &err.to_string(),
            PROMPT_USED,
        ),
    }
}
