//! Status reporting for the costume CLI.
//!
//! Verbs print right-aligned in a fixed gutter, cargo-style, and go to
//! stderr; stdout carries only machine-readable payloads (strip tokens,
//! decimal literals, JSON).

use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// SGR sequences for the few roles the CLI needs.
const VERB_OK: &str = "\x1b[1;32m";
const VERB_NOTE: &str = "\x1b[1;36m";
const VERB_CAUTION: &str = "\x1b[1;33m";
const LABEL_ERROR: &str = "\x1b[1;31m";
const LABEL_WARNING: &str = "\x1b[1;33m";
const FAINT: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Width of the right-aligned verb gutter.
const GUTTER: usize = 12;

/// Status printer; escape sequences are emitted only when stderr is a
/// terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn auto() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A green progress/result line, e.g.
    /// "   Extracted 2 strips from sheet.png".
    pub fn status(&self, verb: &str, message: &str) {
        self.line(VERB_OK, verb, message);
    }

    /// A cyan side-note line ("Found no palette strips", "Normalized ...").
    pub fn info(&self, verb: &str, message: &str) {
        self.line(VERB_NOTE, verb, message);
    }

    /// A yellow caution line for degraded-but-continuing operation.
    pub fn warning(&self, verb: &str, message: &str) {
        self.line(VERB_CAUTION, verb, message);
    }

    /// Render entry locations and help text faintly next to a diagnostic.
    pub fn dim(&self, text: &str) -> String {
        self.paint(FAINT, text)
    }

    /// Render a diagnostic severity label ("error" / "warning").
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        self.paint(if is_error { LABEL_ERROR } else { LABEL_WARNING }, label)
    }

    fn paint(&self, sgr: &str, text: &str) -> String {
        if self.color {
            format!("{sgr}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, sgr: &str, verb: &str, message: &str) {
        let verb = self.paint(sgr, &format!("{verb:>GUTTER$}"));
        let _ = writeln!(io::stderr().lock(), "{verb} {message}");
    }
}

/// Format a count with its noun, pluralized with a plain "s":
/// `count(1, "strip")` → "1 strip", `count(3, "strip")` → "3 strips".
///
/// Everything this CLI counts (strips, costumes, entries via
/// "replacement", errors, warnings) pluralizes regularly.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Display a path relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok());
    match relative {
        Some(p) if p.as_os_str().is_empty() => ".".to_string(),
        Some(p) => p.display().to_string(),
        None => path.display().to_string(),
    }
}
