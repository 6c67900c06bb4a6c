//! Shared reply formatting: trace capping and the ASCII fallback.

/// Rendering limits, fixed at engine construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Render {
    pub(crate) max_trace_lines: usize,
    pub(crate) max_line_chars: usize,
    pub(crate) ascii_only: bool,
}

impl Render {
    /// Cap a derivation trace for display. Long traces end with a count of
    /// what was cut, long lines end with an ellipsis.
    pub(crate) fn trace_block(&self, trace: &[String]) -> Vec<String> {
        let mut out: Vec<String> = trace
            .iter()
            .take(self.max_trace_lines)
            .map(|line| clip(line, self.max_line_chars))
            .collect();
        if trace.len() > self.max_trace_lines {
            out.push(format!("... ({} more lines)", trace.len() - self.max_trace_lines));
        }
        out
    }
}

/// Clip a line to at most `max` characters, ending in `...` when cut.
///
/// Counts chars rather than bytes so the arrows and Cyrillic letters that
/// show up in trace lines never split mid-glyph. A `max` under 3 still
/// yields the bare `...`.
pub(crate) fn clip(line: &str, max: usize) -> String {
    let max = max.max(3);
    if line.chars().count() <= max {
        return line.to_string();
    }
    let kept: String = line.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Rewrite the arithmetic punctuation replies use into plain ASCII.
pub(crate) fn asciify(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '→' => out.push_str("->"),
            '×' => out.push('x'),
            '÷' => out.push('/'),
            _ => out.push(c),
        }
    }
    out
}
