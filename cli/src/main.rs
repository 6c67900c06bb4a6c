//! Codon CLI - the interactive calculator shell.
//!
//! One engine, one local user, one reply per input line:
//!
//! ```text
//! main() -> Engine::welcome() -> loop { read line -> Engine::handle() -> print }
//! ```
//!
//! The engine does all the work; this binary reads stdin, prints reply
//! lines and keeps logging away from the interactive output.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use codon_config::CodonConfig;
use codon_engine::{Engine, EngineOptions, Reply, UserId};

fn init_tracing(config: Option<&CodonConfig>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_codon_log_file(config);

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If no log file opens, prefer "no logs" over mixing them into the
    // interactive output.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_codon_log_file(
    config: Option<&CodonConfig>,
) -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let candidates = codon_log_file_candidates(config);
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn codon_log_file_candidates(config: Option<&CodonConfig>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // An explicit [app] log_dir wins.
    if let Some(dir) = config.and_then(CodonConfig::log_dir) {
        candidates.push(dir.join("codon.log"));
    }

    // Primary: ~/.codon/logs/codon.log
    if let Some(config_path) = CodonConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("codon.log"));
    }

    // Fallback: ./.codon/logs/codon.log (useful in constrained environments)
    candidates.push(PathBuf::from(".codon").join("logs").join("codon.log"));

    candidates
}

fn engine_options(config: Option<&CodonConfig>) -> EngineOptions {
    let mut options = EngineOptions::default();
    let Some(config) = config else {
        return options;
    };

    if let Some(session) = &config.session
        && let Some(secs) = session.timeout_secs
    {
        options.session_timeout = Duration::from_secs(secs);
    }
    if let Some(trace) = &config.trace {
        if let Some(max_lines) = trace.max_lines {
            options.max_trace_lines = max_lines;
        }
        if let Some(max_line_chars) = trace.max_line_chars {
            options.max_line_chars = max_line_chars;
        }
    }
    if let Some(app) = &config.app {
        options.ascii_only = app.ascii_only;
    }
    options
}

/// Split a `timeout <seconds>` host command into its argument.
///
/// Returns `None` when the line is not the timeout command and should go
/// to the engine instead.
fn timeout_arg(input: &str) -> Option<&str> {
    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (input, ""),
    };
    head.eq_ignore_ascii_case("timeout").then_some(rest)
}

/// Apply and persist a new session timeout, returning the line to print.
fn apply_timeout(engine: &mut Engine, arg: &str) -> String {
    let Ok(secs) = arg.parse::<u64>() else {
        return "Usage: timeout <seconds>".to_string();
    };
    engine.set_session_timeout(Duration::from_secs(secs));
    match CodonConfig::persist_timeout(secs) {
        Ok(()) => format!("Sessions now restart after {secs} seconds of inactivity."),
        Err(err) => format!("Timeout set for this run, but saving it failed: {err}"),
    }
}

fn main() -> Result<()> {
    let config = match CodonConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: {err}; continuing with defaults");
            None
        }
    };
    init_tracing(config.as_ref());

    let mut engine = Engine::new(engine_options(config.as_ref()));
    let user = UserId::new(0);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_reply(&mut out, &engine.welcome())?;
    prompt(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(arg) = timeout_arg(input) {
            writeln!(out, "{}", apply_timeout(&mut engine, arg))?;
            prompt(&mut out)?;
            continue;
        }
        print_reply(&mut out, &engine.handle(user, input))?;
        prompt(&mut out)?;
    }

    Ok(())
}

fn print_reply(out: &mut impl Write, reply: &Reply) -> io::Result<()> {
    writeln!(out, "{}", reply.text())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::timeout_arg;

    #[test]
    fn timeout_command_splits_its_argument() {
        assert_eq!(timeout_arg("timeout 300"), Some("300"));
        assert_eq!(timeout_arg("TIMEOUT 45"), Some("45"));
        assert_eq!(timeout_arg("timeout"), Some(""));
        assert_eq!(timeout_arg("timeouts 300"), None);
        assert_eq!(timeout_arg("300"), None);
    }
}
