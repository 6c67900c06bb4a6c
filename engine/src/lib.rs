//! Core engine for Codon - the step dispatcher.
//!
//! The engine owns the session store and turns one line of user input into
//! one structured reply. It never touches a transport: the host feeds it
//! text and prints whatever lines come back.

use std::time::Duration;

use codon_session::{SessionStore, Step};
pub use codon_types::UserId;

mod codes;
mod encoding;
mod input;
mod menus;
mod render;
mod systems;

use render::Render;

// ============================================================================
// Reply and Outcome
// ============================================================================

/// One reply to one user input, as ordered plain-text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    /// The reply as a single newline-joined block.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether any reply line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// What one dispatched input produced: the reply lines and the step the
/// session moves to.
pub(crate) struct Outcome {
    pub(crate) next: Step,
    pub(crate) lines: Vec<String>,
}

impl Outcome {
    pub(crate) fn new(next: Step, lines: Vec<String>) -> Self {
        Self { next, lines }
    }

    /// A finished calculation: show the results, return to the main menu.
    pub(crate) fn finish(mut lines: Vec<String>) -> Self {
        lines.push(String::new());
        lines.push("Type 'menu' to run another calculator.".to_string());
        Self::new(Step::MainMenu, lines)
    }

    /// Rejected input: explain and re-prompt without advancing.
    pub(crate) fn reject(keep: Step, reason: &str, prompt: &str) -> Self {
        tracing::warn!(%reason, "input rejected");
        Self::new(
            keep,
            vec![format!("Invalid input: {reason}."), prompt.to_string()],
        )
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Tunables the host passes in, typically mapped from the config file.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Silence after which a session restarts.
    pub session_timeout: Duration,
    /// Most derivation lines shown per reply.
    pub max_trace_lines: usize,
    /// Longest rendered line, in characters.
    pub max_line_chars: usize,
    /// Replace the non-ASCII punctuation in replies.
    pub ascii_only: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            session_timeout: SessionStore::DEFAULT_TIMEOUT,
            max_trace_lines: 40,
            max_line_chars: 200,
            ascii_only: false,
        }
    }
}

/// The dispatcher. One [`Engine::handle`] call per user message.
#[derive(Debug)]
pub struct Engine {
    sessions: SessionStore,
    render: Render,
}

impl Engine {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self {
            sessions: SessionStore::with_timeout(options.session_timeout),
            render: Render {
                max_trace_lines: options.max_trace_lines,
                max_line_chars: options.max_line_chars,
                ascii_only: options.ascii_only,
            },
        }
    }

    /// Change how long sessions may idle before they restart.
    pub fn set_session_timeout(&mut self, timeout: Duration) {
        self.sessions.set_timeout(timeout);
    }

    /// Greeting shown before the first input.
    #[must_use]
    pub fn welcome(&self) -> Reply {
        let mut lines = vec![
            "Codon - information coding calculators.".to_string(),
            String::new(),
        ];
        lines.extend(menus::main_menu());
        self.reply(lines)
    }

    /// Process one line of user input and advance the user's session.
    pub fn handle(&mut self, user: UserId, input: &str) -> Reply {
        let input = input.trim();

        if self.sessions.is_expired(user) {
            tracing::debug!(user = user.value(), "session expired, restarting");
            self.sessions.reset(user);
            let mut lines = vec![
                "Your session expired after inactivity. Starting over.".to_string(),
                String::new(),
            ];
            lines.extend(menus::main_menu());
            return self.reply(lines);
        }

        if is_menu_command(input) {
            self.sessions.reset(user);
            return self.reply(menus::main_menu());
        }

        let step = self.sessions.get_or_create(user).clone();
        tracing::debug!(
            user = user.value(),
            input = %render::clip(input, 80),
            "dispatching"
        );
        let outcome = dispatch(&step, input, &self.render);
        self.sessions.update(user, outcome.next);
        self.reply(outcome.lines)
    }

    fn reply(&self, lines: Vec<String>) -> Reply {
        if self.render.ascii_only {
            return Reply {
                lines: lines.iter().map(|line| render::asciify(line)).collect(),
            };
        }
        Reply { lines }
    }
}

fn is_menu_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("menu")
        || input.eq_ignore_ascii_case("start")
        || input.eq_ignore_ascii_case("/start")
}

fn dispatch(step: &Step, input: &str, render: &Render) -> Outcome {
    match step {
        Step::MainMenu => menus::main_select(input),
        Step::SystemsMenu => menus::systems_select(input),
        Step::CodesMenu => menus::codes_select(input),
        Step::QrMenu => menus::qr_select(input),
        Step::Koi8Menu => menus::koi8_select(input),
        Step::AudioTargetMenu => menus::audio_target_select(input),
        Step::DetectionMenu => menus::detection_select(input),
        Step::HammingMenu => menus::hamming_select(input),
        Step::ClassificationMenu => menus::classification_select(input),

        Step::ConvertAwaitNumber => systems::convert_number(input),
        Step::ConvertAwaitFromBase { digits } => systems::convert_from_base(digits, input),
        Step::ConvertAwaitToBase { digits, from } => {
            systems::convert_to_base(digits, *from, input, render)
        }
        Step::IntCodeAwaitNumber { method } => systems::int_code(*method, input),
        Step::FloatAwaitNumber => systems::float_binary(input, render),
        Step::Audio(session) => systems::audio_input(*session, input),

        Step::Koi8AwaitText => encoding::koi8_encode(input, render),
        Step::Koi8AwaitBits => encoding::koi8_decode(input, render),
        Step::BlockParityAwaitBits => encoding::block_parity_bits(input),
        Step::BlockParityAwaitSize { bits } => encoding::block_parity_size(bits, input),
        Step::QrNumericAwaitDigits => encoding::qr_numeric(input, render),
        Step::QrMaskedAwaitDigits => encoding::qr_masked_digits(input),
        Step::QrMaskedAwaitMask { digits } => encoding::qr_masked_mask(digits, input, render),
        Step::QrAlphaAwaitText => encoding::qr_alphanumeric(input, render),
        Step::BarcodeAwaitDigits => encoding::barcode(input),

        Step::ParityAwaitBits => codes::parity(input),
        Step::ConstWeightAwaitBits => codes::constant_weight_bits(input),
        Step::ConstWeightAwaitTarget { bits } => codes::constant_weight_target(bits, input),
        Step::InverseAwaitBits => codes::inverse(input),
        Step::ControlNumberAwaitDigits => codes::control_number(input),
        Step::HammingAwaitData => codes::hamming_encode(input),
        Step::HammingAwaitReceived => codes::hamming_decode(input),
        Step::RedundancyAwaitTotal => codes::redundancy_total(input),
        Step::RedundancyAwaitUsed { total } => codes::redundancy_used(*total, input),
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, EngineOptions, UserId, is_menu_command};

    const USER: UserId = UserId::new(1);

    #[test]
    fn menu_command_matches_case_insensitively() {
        assert!(is_menu_command("menu"));
        assert!(is_menu_command("MENU"));
        assert!(is_menu_command("/start"));
        assert!(!is_menu_command("menus"));
        assert!(!is_menu_command(""));
    }

    #[test]
    fn welcome_shows_the_main_menu() {
        let engine = Engine::new(EngineOptions::default());
        let reply = engine.welcome();
        assert!(reply.contains("Main menu:"));
        assert!(reply.contains("1. Number systems and encoding"));
    }

    #[test]
    fn unknown_input_at_main_menu_reshows_it() {
        let mut engine = Engine::new(EngineOptions::default());
        let reply = engine.handle(USER, "what?");
        assert!(reply.contains("Main menu:"));
    }

    #[test]
    fn menu_command_resets_mid_flow() {
        let mut engine = Engine::new(EngineOptions::default());
        engine.handle(USER, "1");
        engine.handle(USER, "1"); // base conversion, awaiting the number
        let reply = engine.handle(USER, "menu");
        assert!(reply.contains("Main menu:"));

        // The next "1" is a menu pick again, not a number to convert.
        let reply = engine.handle(USER, "1");
        assert!(reply.contains("Number systems and encoding:"));
    }

    #[test]
    fn ascii_only_strips_arrows_from_replies() {
        let mut engine = Engine::new(EngineOptions {
            ascii_only: true,
            ..EngineOptions::default()
        });
        engine.handle(USER, "1");
        engine.handle(USER, "1");
        engine.handle(USER, "6");
        engine.handle(USER, "16");
        let reply = engine.handle(USER, "2");
        assert!(reply.contains("110"));
        assert!(!reply.text().contains('×'));
        assert!(!reply.text().contains('÷'));
    }
}
