//! Error-chain formatting for the stack-trace block.

use std::backtrace::BacktraceStatus;

/// Format an error as its message followed by one `Caused by:` line per
/// cause, outermost first, then the captured backtrace frames when the
/// runtime recorded any (`RUST_BACKTRACE`). Deterministic whenever capture
/// is off.
#[must_use]
pub fn format_error_chain(error: &anyhow::Error) -> String {
    let mut s = String::new();
    s.push_str(&format!("{}\n", error));
    for cause in error.chain().skip(1) {
        s.push_str(&format!("Caused by: {}\n", cause));
    }
    let backtrace = error.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        s.push_str("Stack backtrace:\n");
        s.push_str(&backtrace.to_string());
    }
    s
}
