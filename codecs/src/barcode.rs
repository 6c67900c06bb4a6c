//! EAN-13 check digit computation.

use codon_types::{CodecError, DigitString};

/// Digits in an EAN-13 payload, excluding the check digit.
pub const PAYLOAD_LEN: usize = 12;

/// Breakdown of an EAN-13 check digit computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ean13 {
    /// The computed check digit, 0 to 9.
    pub check_digit: u32,
    /// Sum of digits at odd positions, counted from 1.
    pub odd_sum: u32,
    /// Sum of digits at even positions, counted from 1.
    pub even_sum: u32,
    /// `odd_sum + 3 × even_sum`.
    pub weighted_total: u32,
}

/// Compute the EAN-13 check digit for a 12-digit payload.
///
/// Positions count from 1 at the leftmost digit. Odd positions carry weight
/// 1 and even positions weight 3; the check digit brings the weighted total
/// up to the next multiple of ten.
pub fn ean13_checksum(payload: &DigitString) -> Result<Ean13, CodecError> {
    if payload.len() != PAYLOAD_LEN {
        return Err(CodecError::InvalidLength {
            expected: PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let mut odd_sum = 0;
    let mut even_sum = 0;
    for (index, digit) in payload.digits().enumerate() {
        if index % 2 == 0 {
            odd_sum += digit;
        } else {
            even_sum += digit;
        }
    }

    let weighted_total = odd_sum + 3 * even_sum;
    let check_digit = (10 - weighted_total % 10) % 10;

    Ok(Ean13 {
        check_digit,
        odd_sum,
        even_sum,
        weighted_total,
    })
}

#[cfg(test)]
mod tests {
    use super::ean13_checksum;
    use codon_types::{CodecError, DigitString};

    fn digits(raw: &str) -> DigitString {
        DigitString::parse(raw).unwrap()
    }

    #[test]
    fn known_barcode_check_digit() {
        let result = ean13_checksum(&digits("590123412345")).unwrap();
        assert_eq!(result.odd_sum, 17);
        assert_eq!(result.even_sum, 22);
        assert_eq!(result.weighted_total, 83);
        assert_eq!(result.check_digit, 7);
    }

    #[test]
    fn another_known_barcode() {
        let result = ean13_checksum(&digits("460123456789")).unwrap();
        assert_eq!(result.odd_sum, 24);
        assert_eq!(result.even_sum, 31);
        assert_eq!(result.weighted_total, 117);
        assert_eq!(result.check_digit, 3);
    }

    #[test]
    fn multiple_of_ten_total_yields_zero() {
        // 1+1+1+1+1+1 odd, 3×(3+3+3+3+3+3) even: 6 + 54 = 60.
        let result = ean13_checksum(&digits("131313131313")).unwrap();
        assert_eq!(result.weighted_total, 60);
        assert_eq!(result.check_digit, 0);
    }

    #[test]
    fn check_digit_completes_a_multiple_of_ten() {
        for payload in ["590123412345", "460123456789", "000000000000", "999999999999"] {
            let result = ean13_checksum(&digits(payload)).unwrap();
            assert_eq!(
                (result.weighted_total + result.check_digit) % 10,
                0,
                "payload {payload}"
            );
        }
    }

    #[test]
    fn rejects_short_payload() {
        let err = ean13_checksum(&digits("59012341234")).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLength {
                expected: 12,
                actual: 11,
            }
        );
    }

    #[test]
    fn rejects_long_payload() {
        let err = ean13_checksum(&digits("5901234123457")).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLength {
                expected: 12,
                actual: 13,
            }
        );
    }
}
