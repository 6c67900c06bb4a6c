//! Text and symbol encoding flows: KOI-8, block parity, QR modes and the
//! EAN-13 check digit.

use codon_codecs::barcode::ean13_checksum;
use codon_codecs::{checksum, koi8, qr};
use codon_session::Step;
use codon_types::{BitString, DigitString};

use crate::render::Render;
use crate::{Outcome, input};

pub(crate) const PROMPT_KOI8_TEXT: &str = "Enter the text to encode:";
pub(crate) const PROMPT_KOI8_BITS: &str = "Enter the bit string to decode (0 and 1 only):";
pub(crate) const PROMPT_BLOCK_BITS: &str = "Enter the bit string to encode (0 and 1 only):";
pub(crate) const PROMPT_BLOCK_SIZE: &str = "Enter the block size (blank for 8):";
pub(crate) const PROMPT_QR_DIGITS: &str = "Enter the digits to encode:";
pub(crate) const PROMPT_QR_TEXT: &str = "Enter the text to encode:";
pub(crate) const PROMPT_MASK: &str = "Enter the mask (0 and 1 only):";
pub(crate) const PROMPT_BARCODE: &str = "Enter the first 12 digits of the barcode:";

const DEFAULT_BLOCK: usize = 8;

// ============================================================================
// KOI-8
// ============================================================================

pub(crate) fn koi8_encode(input: &str, render: &Render) -> Outcome {
    if input.is_empty() {
        return Outcome::reject(Step::Koi8AwaitText, "enter some text", PROMPT_KOI8_TEXT);
    }
    let encoded = koi8::encode(input);
    let mut lines = render.trace_block(&encoded.trace);
    if encoded.bits.is_empty() {
        lines.push("Nothing could be encoded.".to_string());
    } else {
        lines.push(format!("Encoded: {}", encoded.bits));
    }
    Outcome::finish(lines)
}

pub(crate) fn koi8_decode(input: &str, render: &Render) -> Outcome {
    let bits = match input::parse_bits(input) {
        Ok(bits) => bits,
        Err(reason) => return Outcome::reject(Step::Koi8AwaitBits, &reason, PROMPT_KOI8_BITS),
    };
    let decoded = koi8::decode(&bits);
    let mut lines = render.trace_block(&decoded.trace);
    if decoded.text.is_empty() {
        lines.push("The input held no complete 8-bit group.".to_string());
    } else {
        lines.push(format!("Decoded: {}", decoded.text));
    }
    Outcome::finish(lines)
}

// ============================================================================
// Block parity
// ============================================================================

pub(crate) fn block_parity_bits(input: &str) -> Outcome {
    match input::parse_bits(input) {
        Ok(bits) => Outcome::new(
            Step::BlockParityAwaitSize { bits },
            vec![PROMPT_BLOCK_SIZE.to_string()],
        ),
        Err(reason) => Outcome::reject(Step::BlockParityAwaitBits, &reason, PROMPT_BLOCK_BITS),
    }
}

pub(crate) fn block_parity_size(bits: &BitString, input: &str) -> Outcome {
    let size = if input.is_empty() {
        DEFAULT_BLOCK
    } else {
        match input::parse_usize(input) {
            Ok(size) => size,
            Err(reason) => {
                return Outcome::reject(
                    Step::BlockParityAwaitSize { bits: bits.clone() },
                    &reason,
                    PROMPT_BLOCK_SIZE,
                );
            }
        }
    };

    match checksum::block_parity(bits, size) {
        Ok(blocks) => {
            let mut lines: Vec<String> = blocks
                .iter()
                .enumerate()
                .map(|(i, block)| {
                    format!(
                        "Block {}: {} → {} (ones {}, parity {})",
                        i + 1,
                        block.block,
                        block.encoded,
                        block.ones,
                        block.parity_bit
                    )
                })
                .collect();
            let joined: Vec<&str> = blocks.iter().map(|block| block.encoded.as_str()).collect();
            lines.push(format!("Encoded: {}", joined.join(" ")));
            Outcome::finish(lines)
        }
        Err(_) => Outcome::reject(
            Step::BlockParityAwaitSize { bits: bits.clone() },
            "the block size must be at least 1",
            PROMPT_BLOCK_SIZE,
        ),
    }
}

// ============================================================================
// QR modes
// ============================================================================

pub(crate) fn qr_numeric(input: &str, render: &Render) -> Outcome {
    let digits = match input::parse_digits(input) {
        Ok(digits) => digits,
        Err(reason) => {
            return Outcome::reject(Step::QrNumericAwaitDigits, &reason, PROMPT_QR_DIGITS);
        }
    };
    let encoded = qr::numeric_encode(&digits);
    let mut lines = render.trace_block(&encoded.trace);
    lines.push(format!("Encoded: {}", encoded.bits));
    Outcome::finish(lines)
}

pub(crate) fn qr_masked_digits(input: &str) -> Outcome {
    match input::parse_digits(input) {
        Ok(digits) => Outcome::new(
            Step::QrMaskedAwaitMask { digits },
            vec![PROMPT_MASK.to_string()],
        ),
        Err(reason) => Outcome::reject(Step::QrMaskedAwaitDigits, &reason, PROMPT_QR_DIGITS),
    }
}

pub(crate) fn qr_masked_mask(digits: &DigitString, input: &str, render: &Render) -> Outcome {
    let mask = match input::parse_bits(input) {
        Ok(mask) => mask,
        Err(reason) => {
            return Outcome::reject(
                Step::QrMaskedAwaitMask {
                    digits: digits.clone(),
                },
                &reason,
                PROMPT_MASK,
            );
        }
    };
    // The three-step trace already carries every result line.
    let masked = qr::numeric_encode_masked(digits, &mask);
    Outcome::finish(render.trace_block(&masked.trace))
}

pub(crate) fn qr_alphanumeric(input: &str, render: &Render) -> Outcome {
    if input.is_empty() {
        return Outcome::reject(Step::QrAlphaAwaitText, "enter some text", PROMPT_QR_TEXT);
    }
    let encoded = qr::alphanumeric_encode(input);
    Outcome::finish(render.trace_block(&encoded.trace))
}

// ============================================================================
// EAN-13
// ============================================================================

pub(crate) fn barcode(input: &str) -> Outcome {
    let digits = match input::parse_digits(input) {
        Ok(digits) => digits,
        Err(reason) => return Outcome::reject(Step::BarcodeAwaitDigits, &reason, PROMPT_BARCODE),
    };
    match checksum_lines(&digits) {
        Ok(lines) => Outcome::finish(lines),
        Err(reason) => Outcome::reject(Step::BarcodeAwaitDigits, &reason, PROMPT_BARCODE),
    }
}

fn checksum_lines(digits: &DigitString) -> Result<Vec<String>, String> {
    let result = ean13_checksum(digits).map_err(|err| err.to_string())?;
    Ok(vec![
        format!("Odd positions sum: {}", result.odd_sum),
        format!("Even positions sum: {}", result.even_sum),
        format!(
            "Weighted total: {} + 3 × {} = {}",
            result.odd_sum, result.even_sum, result.weighted_total
        ),
        format!("Check digit: {}", result.check_digit),
        format!("Full barcode: {}{}", digits.as_str(), result.check_digit),
    ])
}
