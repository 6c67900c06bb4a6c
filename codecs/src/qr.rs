//! QR payload encoding: numeric mode, mask application, and the KOI-8
//! alphanumeric fallback.

use num_bigint::BigUint;

use codon_types::{BitString, DigitString};

use crate::koi8;

/// XOR steps spelled out in the mask trace before it switches to a summary.
const TRACED_BITS: usize = 8;

/// Result of QR payload encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Concatenated bit groups.
    pub bits: String,
    /// One line per encoded group.
    pub trace: Vec<String>,
}

/// Encode digits in QR numeric mode.
///
/// Digits split into groups of three from the left; a full group encodes in
/// 10 bits, a two-digit remainder in 7, a single digit in 4.
#[must_use]
pub fn numeric_encode(digits: &DigitString) -> Encoded {
    let mut bits = String::new();
    let mut trace = Vec::new();

    for chunk in digits.as_bytes().chunks(3) {
        let text = String::from_utf8_lossy(chunk);
        let value = chunk
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
        let (width, label) = match chunk.len() {
            3 => (10, "10 bits"),
            2 => (7, "7 bits"),
            _ => (4, "4 bits"),
        };
        let encoded = format!("{value:0width$b}");
        trace.push(format!("Group '{text}' → {value} → {encoded} ({label})"));
        bits.push_str(&encoded);
    }

    Encoded { bits, trace }
}

/// Result of numeric encoding followed by mask application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    /// Numeric-mode bits before masking.
    pub bits: String,
    /// Bits after the XOR mask.
    pub masked_bits: String,
    /// The masked bits read as a base-2 integer.
    pub decimal: String,
    /// Full three-step walkthrough.
    pub trace: Vec<String>,
}

/// Encode digits in numeric mode, then XOR the result with `mask`.
///
/// The mask tiles to the payload length when shorter and truncates when
/// longer.
#[must_use]
pub fn numeric_encode_masked(digits: &DigitString, mask: &BitString) -> Masked {
    let encoded = numeric_encode(digits);
    let bits = encoded.bits;

    let mut trace = Vec::new();
    trace.push("Step 1: numeric encoding".to_string());
    for line in &encoded.trace {
        trace.push(format!("  {line}"));
    }
    trace.push(format!("  Result: {bits}"));
    trace.push(String::new());

    trace.push("Step 2: mask application".to_string());
    trace.push(format!("  Mask: {mask}"));
    let aligned = align_mask(mask.as_str(), bits.len());
    trace.push(format!("  Aligned mask: {aligned}"));

    let mut masked_bits = String::with_capacity(bits.len());
    for (index, (data_bit, mask_bit)) in bits.bytes().zip(aligned.bytes()).enumerate() {
        let bit = if data_bit == mask_bit { '0' } else { '1' };
        masked_bits.push(bit);
        if index < TRACED_BITS {
            trace.push(format!(
                "  Bit {}: {} XOR {} = {bit}",
                index + 1,
                char::from(data_bit),
                char::from(mask_bit),
            ));
        }
    }
    if bits.len() > TRACED_BITS {
        trace.push(format!(
            "  ... (same for the remaining {} bits)",
            bits.len() - TRACED_BITS
        ));
    }
    trace.push(format!("  Masked result: {masked_bits}"));
    trace.push(String::new());

    trace.push("Step 3: decimal value".to_string());
    let decimal = BigUint::parse_bytes(masked_bits.as_bytes(), 2)
        .map(|value| value.to_string())
        .unwrap_or_default();
    trace.push(format!("  {masked_bits} (binary) = {decimal} (decimal)"));

    Masked {
        bits,
        masked_bits,
        decimal,
        trace,
    }
}

/// Encode arbitrary text through the KOI-8 table.
#[must_use]
pub fn alphanumeric_encode(text: &str) -> Encoded {
    let encoded = koi8::encode(text);

    let mut trace = Vec::new();
    trace.push("KOI-8 character encoding:".to_string());
    for line in &encoded.trace {
        trace.push(format!("  {line}"));
    }
    trace.push(format!("Result: {}", encoded.bits));

    Encoded {
        bits: encoded.bits,
        trace,
    }
}

fn align_mask(mask: &str, len: usize) -> String {
    if mask.len() >= len {
        mask[..len].to_string()
    } else {
        mask.bytes().cycle().take(len).map(char::from).collect()
    }
}
