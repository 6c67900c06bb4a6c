//! Parsing of free-form user input into codec types.
//!
//! Every parser returns the rejection reason as text ready for
//! [`Outcome::reject`](crate::Outcome::reject).

use codon_types::{BitString, DigitString, Radix};

pub(crate) fn parse_bits(input: &str) -> Result<BitString, String> {
    BitString::parse(input).map_err(|err| err.to_string())
}

pub(crate) fn parse_digits(input: &str) -> Result<DigitString, String> {
    DigitString::parse(input).map_err(|err| err.to_string())
}

pub(crate) fn parse_base(input: &str) -> Result<Radix, String> {
    let value: u32 = input
        .parse()
        .map_err(|_| "the base must be a whole number".to_string())?;
    Radix::new(value).map_err(|err| err.to_string())
}

pub(crate) fn parse_int(input: &str) -> Result<i64, String> {
    input.parse().map_err(|_| "enter a whole number".to_string())
}

pub(crate) fn parse_u64(input: &str) -> Result<u64, String> {
    input
        .parse()
        .map_err(|_| "enter a whole number, 0 or more".to_string())
}

pub(crate) fn parse_usize(input: &str) -> Result<usize, String> {
    input
        .parse()
        .map_err(|_| "enter a whole number, 0 or more".to_string())
}

pub(crate) fn parse_float(input: &str) -> Result<f64, String> {
    let value: f64 = input.parse().map_err(|_| "enter a number".to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("enter a finite number".to_string())
    }
}

pub(crate) fn parse_positive_float(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .parse()
        .map_err(|_| "enter a number greater than zero".to_string())?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err("enter a number greater than zero".to_string())
    }
}

/// Digits-and-letters input for base conversion, normalized to uppercase.
pub(crate) fn parse_radix_digits(input: &str) -> Result<String, String> {
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(input.to_ascii_uppercase())
    } else {
        Err("enter a number using digits and letters only".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_base, parse_bits, parse_float, parse_int, parse_positive_float, parse_radix_digits,
        parse_usize,
    };

    #[test]
    fn bits_reject_other_characters() {
        assert!(parse_bits("0101").is_ok());
        let err = parse_bits("01a1").unwrap_err();
        assert!(err.contains("'0' and '1'"), "unexpected message: {err}");
    }

    #[test]
    fn base_rejects_text_and_out_of_range_values() {
        assert_eq!(parse_base("16").unwrap().get(), 16);
        assert_eq!(parse_base("ten").unwrap_err(), "the base must be a whole number");
        assert!(parse_base("37").unwrap_err().contains("2..=36"));
    }

    #[test]
    fn ints_and_sizes_parse_with_plain_messages() {
        assert_eq!(parse_int("-42").unwrap(), -42);
        assert_eq!(parse_int("4.2").unwrap_err(), "enter a whole number");
        assert_eq!(parse_usize("8").unwrap(), 8);
        assert_eq!(parse_usize("-8").unwrap_err(), "enter a whole number, 0 or more");
    }

    #[test]
    fn floats_must_be_finite() {
        assert_eq!(parse_float("5.75").unwrap(), 5.75);
        assert_eq!(parse_float("inf").unwrap_err(), "enter a finite number");
        assert!(parse_positive_float("0").is_err());
        assert!(parse_positive_float("-1.5").is_err());
        assert_eq!(parse_positive_float("44100").unwrap(), 44100.0);
    }

    #[test]
    fn radix_digits_uppercase_and_reject_punctuation() {
        assert_eq!(parse_radix_digits("1a3f").unwrap(), "1A3F");
        assert!(parse_radix_digits("1a 3f").is_err());
        assert!(parse_radix_digits("").is_err());
    }
}
