//! Number-system flows: base conversion, machine integer codes, float
//! expansion and the audio recording size calculator.

use codon_codecs::{audio, intcode, radix};
use codon_session::{AudioParam, AudioSession, IntCodeMethod, Step};
use codon_types::{CodecError, Radix};

use crate::render::Render;
use crate::{Outcome, input, menus};

pub(crate) const PROMPT_NUMBER: &str =
    "Enter the number to convert (digits and letters, e.g. 1A3F):";
pub(crate) const PROMPT_FROM_BASE: &str = "Enter the source base (2-36):";
pub(crate) const PROMPT_TO_BASE: &str = "Enter the target base (2-36):";
pub(crate) const PROMPT_INT: &str = "Enter a whole number between -127 and 127:";
pub(crate) const PROMPT_FLOAT: &str = "Enter a number, fractional part allowed (e.g. 5.75):";

/// Integer codes render at this fixed width.
const INT_WIDTH: usize = 8;

pub(crate) fn param_prompt(param: AudioParam) -> &'static str {
    match param {
        AudioParam::Volume => "Enter the size in bytes:",
        AudioParam::Frequency => "Enter the sample rate in Hz:",
        AudioParam::Depth => "Enter the bit depth in bits:",
        AudioParam::Duration => "Enter the duration in seconds (at least 0.1):",
        AudioParam::Channels => "Enter the number of channels (1 or 2):",
    }
}

// ============================================================================
// Base conversion
// ============================================================================

pub(crate) fn convert_number(input: &str) -> Outcome {
    match input::parse_radix_digits(input) {
        Ok(digits) => Outcome::new(
            Step::ConvertAwaitFromBase { digits },
            vec![PROMPT_FROM_BASE.to_string()],
        ),
        Err(reason) => Outcome::reject(Step::ConvertAwaitNumber, &reason, PROMPT_NUMBER),
    }
}

pub(crate) fn convert_from_base(digits: &str, input: &str) -> Outcome {
    let from = match input::parse_base(input) {
        Ok(base) => base,
        Err(reason) => {
            return Outcome::reject(
                Step::ConvertAwaitFromBase {
                    digits: digits.to_string(),
                },
                &reason,
                PROMPT_FROM_BASE,
            );
        }
    };

    // The digits were accepted before the base was known, so check now.
    if let Some(digit) = first_invalid_digit(digits, from) {
        let reason = CodecError::InvalidDigit {
            digit,
            base: from.get(),
        };
        return Outcome::reject(Step::ConvertAwaitNumber, &reason.to_string(), PROMPT_NUMBER);
    }

    Outcome::new(
        Step::ConvertAwaitToBase {
            digits: digits.to_string(),
            from,
        },
        vec![PROMPT_TO_BASE.to_string()],
    )
}

pub(crate) fn convert_to_base(digits: &str, from: Radix, input: &str, render: &Render) -> Outcome {
    let to = match input::parse_base(input) {
        Ok(base) => base,
        Err(reason) => {
            return Outcome::reject(
                Step::ConvertAwaitToBase {
                    digits: digits.to_string(),
                    from,
                },
                &reason,
                PROMPT_TO_BASE,
            );
        }
    };

    match radix::convert(digits, from, to) {
        Ok(conversion) => {
            let mut lines = vec![
                format!("{digits} (base {from}) = {} (base {to})", conversion.digits),
                String::new(),
                "Steps:".to_string(),
            ];
            lines.extend(render.trace_block(&conversion.trace));
            Outcome::finish(lines)
        }
        Err(err) => Outcome::reject(Step::ConvertAwaitNumber, &err.to_string(), PROMPT_NUMBER),
    }
}

fn first_invalid_digit(digits: &str, base: Radix) -> Option<char> {
    digits.chars().find(|&c| base.digit_value(c).is_none())
}

// ============================================================================
// Integer and float codes
// ============================================================================

pub(crate) fn int_code(method: IntCodeMethod, input: &str) -> Outcome {
    let value = match input::parse_int(input) {
        Ok(value) => value,
        Err(reason) => {
            return Outcome::reject(Step::IntCodeAwaitNumber { method }, &reason, PROMPT_INT);
        }
    };
    match render_codes(method, value) {
        Ok(lines) => Outcome::finish(lines),
        Err(err) => Outcome::reject(
            Step::IntCodeAwaitNumber { method },
            &err.to_string(),
            PROMPT_INT,
        ),
    }
}

fn render_codes(method: IntCodeMethod, value: i64) -> Result<Vec<String>, CodecError> {
    let mut lines = vec![
        format!(
            "Sign-magnitude: {}",
            intcode::sign_magnitude(value, INT_WIDTH)?
        ),
        format!(
            "Ones' complement: {}",
            intcode::ones_complement(value, INT_WIDTH)?
        ),
    ];
    if method == IntCodeMethod::TwosComplement {
        lines.push(format!(
            "Two's complement: {}",
            intcode::twos_complement(value, INT_WIDTH)?
        ));
    }
    Ok(lines)
}

pub(crate) fn float_binary(input: &str, render: &Render) -> Outcome {
    let value = match input::parse_float(input) {
        Ok(value) => value,
        Err(reason) => return Outcome::reject(Step::FloatAwaitNumber, &reason, PROMPT_FLOAT),
    };
    let expansion = intcode::float_to_binary(value);
    let mut lines = vec![format!("Binary expansion of {value}:")];
    lines.extend(render.trace_block(&expansion.trace));
    // Kept outside the trace so a capped trace still shows the answer.
    lines.push(format!("Result: {}", expansion.normalized));
    Outcome::finish(lines)
}

// ============================================================================
// Audio recording size
// ============================================================================

/// Prompt for the next missing input, or finish if everything is known.
pub(crate) fn audio_prompt(session: AudioSession) -> Outcome {
    match session.awaiting() {
        Some(param) => Outcome::new(Step::Audio(session), vec![param_prompt(param).to_string()]),
        None => audio_finish(&session),
    }
}

pub(crate) fn audio_input(mut session: AudioSession, input: &str) -> Outcome {
    let Some(param) = session.awaiting() else {
        return audio_finish(&session);
    };
    let value = match audio_value(param, input) {
        Ok(value) => value,
        Err(reason) => {
            return Outcome::reject(Step::Audio(session), &reason, param_prompt(param));
        }
    };
    session.set(param, value);
    audio_prompt(session)
}

/// Per-parameter input rules. Channels are 1 or 2; the duration has a
/// 0.1-second floor; the rest accept any positive value.
fn audio_value(param: AudioParam, input: &str) -> Result<f64, String> {
    match param {
        AudioParam::Channels => match input.parse::<u8>() {
            Ok(n @ 1..=2) => Ok(f64::from(n)),
            _ => Err("enter 1 for mono or 2 for stereo".to_string()),
        },
        AudioParam::Duration => {
            let value = input::parse_positive_float(input)?;
            if value < 0.1 {
                return Err("the duration must be at least 0.1 seconds".to_string());
            }
            Ok(value)
        }
        _ => input::parse_positive_float(input),
    }
}

fn audio_finish(session: &AudioSession) -> Outcome {
    match audio_result(session) {
        Some(lines) => Outcome::finish(lines),
        None => {
            let mut lines = vec![
                "Something was missing. Let's start this calculation over.".to_string(),
                String::new(),
            ];
            lines.extend(menus::audio_menu());
            Outcome::new(Step::AudioTargetMenu, lines)
        }
    }
}

fn audio_result(session: &AudioSession) -> Option<Vec<String>> {
    let value = |param: AudioParam| session.inputs.value(param);
    let lines = match session.target {
        AudioParam::Volume => {
            let size = audio::size(
                value(AudioParam::Frequency)?,
                value(AudioParam::Depth)?,
                value(AudioParam::Duration)?,
                value(AudioParam::Channels)?,
            );
            vec![
                format!("Size: {} bytes", size.bytes),
                format!("    = {:.2} KB", size.kilobytes),
                format!("    = {:.2} MB", size.megabytes),
            ]
        }
        AudioParam::Frequency => {
            let result = audio::frequency(
                value(AudioParam::Volume)?,
                value(AudioParam::Depth)?,
                value(AudioParam::Duration)?,
                value(AudioParam::Channels)?,
            )
            .ok()?;
            vec![format!("Sample rate: {result:.2} Hz")]
        }
        AudioParam::Depth => {
            let result = audio::depth(
                value(AudioParam::Volume)?,
                value(AudioParam::Frequency)?,
                value(AudioParam::Duration)?,
                value(AudioParam::Channels)?,
            )
            .ok()?;
            vec![format!("Bit depth: {result:.2} bits")]
        }
        AudioParam::Duration => {
            let result = audio::duration(
                value(AudioParam::Volume)?,
                value(AudioParam::Frequency)?,
                value(AudioParam::Depth)?,
                value(AudioParam::Channels)?,
            )
            .ok()?;
            vec![format!("Duration: {result:.2} seconds")]
        }
        AudioParam::Channels => {
            let result = audio::channels(
                value(AudioParam::Volume)?,
                value(AudioParam::Frequency)?,
                value(AudioParam::Depth)?,
                value(AudioParam::Duration)?,
            )
            .ok()?;
            vec![format!("Channels: {result:.2}")]
        }
    };
    Some(lines)
}
