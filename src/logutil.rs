//! Log sanitizing for player-supplied strings (names typed at the prompt).
//! Keeps every log record on a single line.

/// Escape control characters so a logged string cannot split or mangle a
/// log line. Long strings are truncated with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 120;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
