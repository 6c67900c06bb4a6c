//! Audio recording size arithmetic.
//!
//! Everything derives from `V = F × (B / 8) × T × C` where V is the size in
//! bytes, F the sample rate in Hz, B the bit depth, T the duration in
//! seconds, and C the channel count. [`size`] computes V; the solver
//! functions rearrange the formula for each remaining parameter.

use codon_types::CodecError;

/// Computed recording size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Whole bytes, truncated.
    pub bytes: u64,
    /// Exact size in kibibytes.
    pub kilobytes: f64,
    /// Exact size in mebibytes.
    pub megabytes: f64,
}

/// Size of a recording from its four parameters.
#[must_use]
pub fn size(frequency: f64, depth: f64, duration: f64, channels: f64) -> Size {
    let total = frequency * (depth / 8.0) * duration * channels;
    let kilobytes = total / 1024.0;
    Size {
        bytes: total as u64,
        kilobytes,
        megabytes: kilobytes / 1024.0,
    }
}

/// Sample rate in Hz from the size in bytes and the other parameters.
pub fn frequency(volume: f64, depth: f64, duration: f64, channels: f64) -> Result<f64, CodecError> {
    ensure_nonzero(depth, "depth")?;
    ensure_nonzero(duration, "duration")?;
    ensure_nonzero(channels, "channels")?;
    Ok(volume / ((depth / 8.0) * duration * channels))
}

/// Bit depth from the size in bytes and the other parameters.
pub fn depth(volume: f64, frequency: f64, duration: f64, channels: f64) -> Result<f64, CodecError> {
    ensure_nonzero(frequency, "frequency")?;
    ensure_nonzero(duration, "duration")?;
    ensure_nonzero(channels, "channels")?;
    Ok(volume * 8.0 / (frequency * duration * channels))
}

/// Duration in seconds from the size in bytes and the other parameters.
pub fn duration(volume: f64, frequency: f64, depth: f64, channels: f64) -> Result<f64, CodecError> {
    ensure_nonzero(frequency, "frequency")?;
    ensure_nonzero(depth, "depth")?;
    ensure_nonzero(channels, "channels")?;
    Ok(volume / (frequency * (depth / 8.0) * channels))
}

/// Channel count from the size in bytes and the other parameters.
pub fn channels(volume: f64, frequency: f64, depth: f64, duration: f64) -> Result<f64, CodecError> {
    ensure_nonzero(frequency, "frequency")?;
    ensure_nonzero(depth, "depth")?;
    ensure_nonzero(duration, "duration")?;
    Ok(volume / (frequency * (depth / 8.0) * duration))
}

fn ensure_nonzero(value: f64, operand: &'static str) -> Result<(), CodecError> {
    if value == 0.0 {
        return Err(CodecError::DivisionByZero { operand });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{channels, depth, duration, frequency, size};
    use codon_types::CodecError;

    const CD_STEREO_MINUTE: f64 = 10_584_000.0;

    #[test]
    fn cd_quality_stereo_minute() {
        let result = size(44_100.0, 16.0, 60.0, 2.0);
        assert_eq!(result.bytes, 10_584_000);
        assert!((result.kilobytes - 10_335.9375).abs() < f64::EPSILON);
        assert!((result.megabytes - 10.093_688_964_843_75).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_bytes_truncate() {
        // 1 Hz at 12 bits is a byte and a half per second.
        let result = size(1.0, 12.0, 1.0, 1.0);
        assert_eq!(result.bytes, 1);
    }

    #[test]
    fn solvers_recover_each_parameter() {
        let volume = CD_STEREO_MINUTE;
        assert!((frequency(volume, 16.0, 60.0, 2.0).unwrap() - 44_100.0).abs() < f64::EPSILON);
        assert!((depth(volume, 44_100.0, 60.0, 2.0).unwrap() - 16.0).abs() < f64::EPSILON);
        assert!((duration(volume, 44_100.0, 16.0, 2.0).unwrap() - 60.0).abs() < f64::EPSILON);
        assert!((channels(volume, 44_100.0, 16.0, 60.0).unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_operand_is_rejected() {
        let err = frequency(CD_STEREO_MINUTE, 0.0, 60.0, 2.0).unwrap_err();
        assert_eq!(err, CodecError::DivisionByZero { operand: "depth" });

        let err = channels(CD_STEREO_MINUTE, 44_100.0, 16.0, 0.0).unwrap_err();
        assert_eq!(err, CodecError::DivisionByZero { operand: "duration" });
    }
}
