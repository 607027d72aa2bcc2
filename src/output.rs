//! Terminal output formatting for the tilestitch CLI.
//!
//! Status lines carry a glyph (success, warning, error, file) followed by a
//! right-aligned coloured verb, Cargo style. All status output goes to stderr.

use std::io::{self, IsTerminal, Write};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Status glyphs.
pub const GLYPH_SUCCESS: &str = "✅";
pub const GLYPH_WARNING: &str = "⚠️";
pub const GLYPH_ERROR: &str = "❌";
pub const GLYPH_FILE: &str = "📄";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. A silent printer drops
/// every line, which keeps library callers and tests quiet.
pub struct Printer {
    color: bool,
    silent: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            silent: false,
        }
    }

    /// A printer that writes nothing.
    pub fn silent() -> Self {
        Self {
            color: false,
            silent: true,
        }
    }

    /// Print the header line for a configuration file being processed.
    /// e.g. "📄   Processing maps/world.yml"
    pub fn file(&self, verb: &str, message: &str) {
        self.print_line(GLYPH_FILE, CYAN, verb, message);
    }

    /// Print a success/completion line with a green bold verb.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GLYPH_SUCCESS, GREEN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(GLYPH_WARNING, YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(GLYPH_ERROR, RED, verb, message);
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, glyph: &str, color: &str, verb: &str, message: &str) {
        if self.silent {
            return;
        }
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{glyph} {BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{glyph} {verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "image", "images")` → "1 image".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "image", "images"), "1 image");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "file", "files"), "0 files");
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        let p = Path::new("/nonexistent/path/to/map1.png");
        assert_eq!(display_path(p), "/nonexistent/path/to/map1.png");
    }

    #[test]
    fn test_silent_printer_has_no_colour() {
        let printer = Printer::silent();
        assert_eq!(printer.cyan("output/World1.png"), "output/World1.png");
        // Must not panic or write.
        printer.warning("Skipping", "nothing");
    }
}
