//! Menu screens and the routing for numbered picks.

use codon_session::{AudioParam, AudioSession, IntCodeMethod, Step};

use crate::{Outcome, codes, encoding, systems};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

// ============================================================================
// Screens
// ============================================================================

pub(crate) fn main_menu() -> Vec<String> {
    lines(&[
        "Main menu:",
        "  1. Number systems and encoding",
        "  2. Codes and error control",
        "Pick an option by number.",
    ])
}

pub(crate) fn systems_menu() -> Vec<String> {
    lines(&[
        "Number systems and encoding:",
        "  1. Base conversion",
        "  2. Ones' complement code",
        "  3. Two's complement code",
        "  4. Float to binary",
        "  5. Audio recording size",
        "  6. QR encoding",
        "  7. KOI-8 text coding",
        "  8. EAN-13 check digit",
        "  0. Back",
    ])
}

pub(crate) fn codes_menu() -> Vec<String> {
    lines(&[
        "Codes and error control:",
        "  1. Error detection codes",
        "  2. Hamming code",
        "  3. Code classification",
        "  0. Back",
    ])
}

pub(crate) fn detection_menu() -> Vec<String> {
    lines(&[
        "Error detection codes:",
        "  1. Parity bit",
        "  2. Constant weight code",
        "  3. Inverse code",
        "  4. Control number",
        "  0. Back",
    ])
}

pub(crate) fn hamming_menu() -> Vec<String> {
    lines(&[
        "Hamming code:",
        "  1. Encode data bits",
        "  2. Decode a received block",
        "  0. Back",
    ])
}

pub(crate) fn classification_menu() -> Vec<String> {
    lines(&[
        "Code classification:",
        "  1. Redundancy calculator",
        "  2. Classification methods",
        "  3. Coding methods",
        "  0. Back",
    ])
}

pub(crate) fn qr_menu() -> Vec<String> {
    lines(&[
        "QR encoding:",
        "  1. Numeric mode",
        "  2. Numeric mode with mask",
        "  3. Alphanumeric (KOI-8)",
        "  0. Back",
    ])
}

pub(crate) fn koi8_menu() -> Vec<String> {
    lines(&[
        "KOI-8 text coding:",
        "  1. Encode text to bits",
        "  2. Decode bits to text",
        "  3. Block parity encoding",
        "  0. Back",
    ])
}

pub(crate) fn audio_menu() -> Vec<String> {
    lines(&[
        "Audio recording size. What should be computed?",
        "  1. Size in bytes",
        "  2. Sample rate (Hz)",
        "  3. Bit depth (bits)",
        "  4. Duration (seconds)",
        "  5. Channel count",
        "  0. Back",
    ])
}

// ============================================================================
// Routing
// ============================================================================

/// Unrecognized pick: nudge and show the menu again.
fn retry(menu: Vec<String>, step: Step, input: &str) -> Outcome {
    let mut out = Vec::new();
    if !input.is_empty() {
        out.push("Pick one of the numbered options.".to_string());
        out.push(String::new());
    }
    out.extend(menu);
    Outcome::new(step, out)
}

fn enter(step: Step, prompt: &str) -> Outcome {
    Outcome::new(step, vec![prompt.to_string()])
}

fn show(step: Step, menu: Vec<String>) -> Outcome {
    Outcome::new(step, menu)
}

pub(crate) fn main_select(input: &str) -> Outcome {
    match input {
        "1" => show(Step::SystemsMenu, systems_menu()),
        "2" => show(Step::CodesMenu, codes_menu()),
        _ => retry(main_menu(), Step::MainMenu, input),
    }
}

pub(crate) fn systems_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::ConvertAwaitNumber, systems::PROMPT_NUMBER),
        "2" => enter(
            Step::IntCodeAwaitNumber {
                method: IntCodeMethod::OnesComplement,
            },
            systems::PROMPT_INT,
        ),
        "3" => enter(
            Step::IntCodeAwaitNumber {
                method: IntCodeMethod::TwosComplement,
            },
            systems::PROMPT_INT,
        ),
        "4" => enter(Step::FloatAwaitNumber, systems::PROMPT_FLOAT),
        "5" => show(Step::AudioTargetMenu, audio_menu()),
        "6" => show(Step::QrMenu, qr_menu()),
        "7" => show(Step::Koi8Menu, koi8_menu()),
        "8" => enter(Step::BarcodeAwaitDigits, encoding::PROMPT_BARCODE),
        "0" => show(Step::MainMenu, main_menu()),
        _ => retry(systems_menu(), Step::SystemsMenu, input),
    }
}

pub(crate) fn codes_select(input: &str) -> Outcome {
    match input {
        "1" => show(Step::DetectionMenu, detection_menu()),
        "2" => show(Step::HammingMenu, hamming_menu()),
        "3" => show(Step::ClassificationMenu, classification_menu()),
        "0" => show(Step::MainMenu, main_menu()),
        _ => retry(codes_menu(), Step::CodesMenu, input),
    }
}

pub(crate) fn detection_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::ParityAwaitBits, codes::PROMPT_DATA_BITS),
        "2" => enter(Step::ConstWeightAwaitBits, codes::PROMPT_DATA_BITS),
        "3" => enter(Step::InverseAwaitBits, codes::PROMPT_DATA_BITS),
        "4" => enter(Step::ControlNumberAwaitDigits, codes::PROMPT_CONTROL_DIGITS),
        "0" => show(Step::CodesMenu, codes_menu()),
        _ => retry(detection_menu(), Step::DetectionMenu, input),
    }
}

pub(crate) fn hamming_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::HammingAwaitData, codes::PROMPT_DATA_BITS),
        "2" => enter(Step::HammingAwaitReceived, codes::PROMPT_HAMMING_RECEIVED),
        "0" => show(Step::CodesMenu, codes_menu()),
        _ => retry(hamming_menu(), Step::HammingMenu, input),
    }
}

pub(crate) fn classification_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::RedundancyAwaitTotal, codes::PROMPT_TOTAL),
        "2" => Outcome::finish(classification_info()),
        "3" => Outcome::finish(coding_info()),
        "0" => show(Step::CodesMenu, codes_menu()),
        _ => retry(classification_menu(), Step::ClassificationMenu, input),
    }
}

pub(crate) fn qr_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::QrNumericAwaitDigits, encoding::PROMPT_QR_DIGITS),
        "2" => enter(Step::QrMaskedAwaitDigits, encoding::PROMPT_QR_DIGITS),
        "3" => enter(Step::QrAlphaAwaitText, encoding::PROMPT_QR_TEXT),
        "0" => show(Step::SystemsMenu, systems_menu()),
        _ => retry(qr_menu(), Step::QrMenu, input),
    }
}

pub(crate) fn koi8_select(input: &str) -> Outcome {
    match input {
        "1" => enter(Step::Koi8AwaitText, encoding::PROMPT_KOI8_TEXT),
        "2" => enter(Step::Koi8AwaitBits, encoding::PROMPT_KOI8_BITS),
        "3" => enter(Step::BlockParityAwaitBits, encoding::PROMPT_BLOCK_BITS),
        "0" => show(Step::SystemsMenu, systems_menu()),
        _ => retry(koi8_menu(), Step::Koi8Menu, input),
    }
}

pub(crate) fn audio_target_select(input: &str) -> Outcome {
    let target = match input {
        "1" => AudioParam::Volume,
        "2" => AudioParam::Frequency,
        "3" => AudioParam::Depth,
        "4" => AudioParam::Duration,
        "5" => AudioParam::Channels,
        "0" => return show(Step::SystemsMenu, systems_menu()),
        _ => return retry(audio_menu(), Step::AudioTargetMenu, input),
    };
    systems::audio_prompt(AudioSession::new(target))
}

// ============================================================================
// Reference screens
// ============================================================================

fn classification_info() -> Vec<String> {
    lines(&[
        "Codes are classified by:",
        "  - uniformity: every codeword the same length, or variable length",
        "  - redundancy: redundant codes carry extra check symbols, irredundant do not",
        "  - error handling: detecting codes find errors, correcting codes also fix them",
    ])
}

fn coding_info() -> Vec<String> {
    lines(&[
        "Common coding methods:",
        "  - direct, ones' and two's complement for signed integers",
        "  - positional base conversion for number systems",
        "  - parity, constant weight, inverse and control number codes for error detection",
        "  - Hamming codes for single-error correction",
    ])
}
