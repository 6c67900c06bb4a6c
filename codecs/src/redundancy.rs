//! Code redundancy from combination counts.

use codon_types::CodecError;

/// Share of a code space left unused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Redundancy {
    /// Combinations the code never produces.
    pub unused: u64,
    /// Unused share of the code space, in percent.
    pub percent: f64,
}

/// Redundancy of a code that uses `used` of `total` possible combinations.
pub fn redundancy(total: u64, used: u64) -> Result<Redundancy, CodecError> {
    if total == 0 {
        return Err(CodecError::DivisionByZero {
            operand: "total combinations",
        });
    }
    if used < 1 || used > total {
        return Err(CodecError::InvalidRange {
            value: used as f64,
            min: 1.0,
            max: total as f64,
        });
    }

    let unused = total - used;
    Ok(Redundancy {
        unused,
        percent: unused as f64 / total as f64 * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::redundancy;
    use codon_types::CodecError;

    #[test]
    fn partial_use_leaves_redundancy() {
        let result = redundancy(256, 100).unwrap();
        assert_eq!(result.unused, 156);
        assert!((result.percent - 60.9375).abs() < f64::EPSILON);
    }

    #[test]
    fn full_use_has_no_redundancy() {
        let result = redundancy(100, 100).unwrap();
        assert_eq!(result.unused, 0);
        assert!(result.percent.abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_is_rejected() {
        let err = redundancy(0, 5).unwrap_err();
        assert_eq!(
            err,
            CodecError::DivisionByZero {
                operand: "total combinations"
            }
        );
    }

    #[test]
    fn used_outside_total_is_rejected() {
        assert_eq!(
            redundancy(256, 0).unwrap_err(),
            CodecError::InvalidRange {
                value: 0.0,
                min: 1.0,
                max: 256.0,
            }
        );
        assert_eq!(
            redundancy(100, 101).unwrap_err(),
            CodecError::InvalidRange {
                value: 101.0,
                min: 1.0,
                max: 100.0,
            }
        );
    }
}
