//! Machine representations of signed integers and the normalized binary
//! form of floating-point numbers.

use codon_types::CodecError;

/// Narrowest supported machine word.
pub const MIN_WIDTH: usize = 2;
/// Widest supported machine word.
pub const MAX_WIDTH: usize = 64;
/// Fraction bits produced before the expansion stops.
const FRACTION_BITS: usize = 10;

/// Sign-magnitude representation of `value` in `width` bits.
///
/// The leading bit carries the sign, the rest the magnitude. The
/// representable range is `±(2^(width−1) − 1)`.
pub fn sign_magnitude(value: i64, width: usize) -> Result<String, CodecError> {
    check_width(width)?;

    let limit = 1u64 << (width - 1);
    if value.unsigned_abs() >= limit {
        let max = (limit - 1) as f64;
        return Err(CodecError::InvalidRange {
            value: value as f64,
            min: -max,
            max,
        });
    }

    let sign = if value < 0 { '1' } else { '0' };
    let mantissa_width = width - 1;
    Ok(format!(
        "{sign}{magnitude:0mantissa_width$b}",
        magnitude = value.unsigned_abs()
    ))
}

/// Ones' complement representation of `value` in `width` bits.
///
/// Non-negative values match sign-magnitude; negative values invert every
/// magnitude bit.
pub fn ones_complement(value: i64, width: usize) -> Result<String, CodecError> {
    let direct = sign_magnitude(value, width)?;
    if value >= 0 {
        return Ok(direct);
    }

    let inverted: String = direct[1..]
        .chars()
        .map(|c| if c == '0' { '1' } else { '0' })
        .collect();
    Ok(format!("1{inverted}"))
}

/// Two's complement representation of `value` in `width` bits.
///
/// Negative values add one to the ones' complement. The sign bit never
/// takes part in the carry.
pub fn twos_complement(value: i64, width: usize) -> Result<String, CodecError> {
    let ones = ones_complement(value, width)?;
    if value >= 0 {
        return Ok(ones);
    }

    // A negative magnitude always leaves a zero somewhere in the inverted
    // mantissa, so the carry stops before the sign bit.
    let mut bits: Vec<char> = ones.chars().collect();
    for slot in bits[1..].iter_mut().rev() {
        if *slot == '0' {
            *slot = '1';
            break;
        }
        *slot = '0';
    }
    Ok(bits.into_iter().collect())
}

fn check_width(width: usize) -> Result<(), CodecError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        return Err(CodecError::InvalidRange {
            value: width as f64,
            min: MIN_WIDTH as f64,
            max: MAX_WIDTH as f64,
        });
    }
    Ok(())
}

/// Result of normalizing a float into binary scientific notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatBinary {
    /// `1.mantissa × 2^exponent`, or `0` for zero input.
    pub normalized: String,
    /// Integer and fraction expansion steps.
    pub trace: Vec<String>,
}

/// Expand `value` into binary and normalize it.
///
/// The sign is ignored. The fraction expands by repeated doubling, up to
/// ten bits.
#[must_use]
pub fn float_to_binary(value: f64) -> FloatBinary {
    let magnitude = value.abs();
    let integer_part = magnitude.trunc() as u64;
    let int_bits = format!("{integer_part:b}");

    let mut trace = Vec::new();
    trace.push(format!("Integer part: {integer_part} → {int_bits}"));

    let fraction = magnitude.fract();
    let mut frac_bits = String::new();
    if fraction > 0.0 {
        trace.push(format!("Fractional part: {fraction}"));
        let mut rest = fraction;
        for _ in 0..FRACTION_BITS {
            let doubled = rest * 2.0;
            let bit = doubled.trunc() as u32;
            trace.push(format!("  {rest:.6} × 2 = {doubled:.6} (integer part {bit})"));
            frac_bits.push(if bit == 0 { '0' } else { '1' });
            rest = doubled - f64::from(bit);
            if rest == 0.0 {
                break;
            }
        }
    }

    let normalized = if integer_part > 0 {
        let exponent = int_bits.len() - 1;
        let mantissa = format!("{}{frac_bits}", &int_bits[1..]);
        render_normalized(&mantissa, exponent as i64)
    } else if let Some(pos) = frac_bits.find('1') {
        let exponent = -(pos as i64 + 1);
        render_normalized(&frac_bits[pos + 1..], exponent)
    } else {
        "0".to_string()
    };

    if normalized != "0" {
        trace.push(format!("Normalized: {normalized}"));
    }

    FloatBinary { normalized, trace }
}

fn render_normalized(mantissa: &str, exponent: i64) -> String {
    let mantissa = if mantissa.is_empty() { "0" } else { mantissa };
    format!("1.{mantissa} × 2^{exponent}")
}
