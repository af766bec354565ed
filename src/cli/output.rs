//! Shared CLI output helpers — global flag probes, JSON printing, and a
//! small styled-symbol palette.
//!
//! Global flags are exported by `main` as `VERDIA_*` environment variables
//! so every command module can check them without threading state through.

use serde_json::Value;

/// Whether `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("VERDIA_JSON").is_ok()
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("VERDIA_QUIET").is_ok()
}

/// Whether `--verbose` was passed.
pub fn is_verbose() -> bool {
    std::env::var("VERDIA_VERBOSE").is_ok()
}

/// Whether `--no-color` was passed (or NO_COLOR is set).
pub fn no_color() -> bool {
    std::env::var("VERDIA_NO_COLOR").is_ok() || std::env::var("NO_COLOR").is_ok()
}

/// Print a machine-readable JSON value to stdout.
pub fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// ANSI styling helper. Degrades to plain text under `--no-color`.
pub struct Styled {
    color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self { color: !no_color() }
    }

    pub fn ok_sym(&self) -> String {
        self.paint("✓", "32")
    }

    pub fn warn_sym(&self) -> String {
        self.paint("!", "33")
    }

    pub fn err_sym(&self) -> String {
        self.paint("✗", "31")
    }

    /// Highlight a fragment (green, the app's accent color).
    pub fn accent(&self, s: &str) -> String {
        self.paint(s, "32")
    }

    /// De-emphasize a fragment.
    pub fn dim(&self, s: &str) -> String {
        self.paint(s, "2")
    }

    /// Bold a fragment.
    pub fn bold(&self, s: &str) -> String {
        self.paint(s, "1")
    }

    fn paint(&self, s: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styling_without_color() {
        let s = Styled { color: false };
        assert_eq!(s.ok_sym(), "✓");
        assert_eq!(s.accent("hola"), "hola");
    }

    #[test]
    fn test_ansi_styling_with_color() {
        let s = Styled { color: true };
        assert!(s.accent("hola").contains("hola"));
        assert!(s.accent("hola").starts_with("\x1b["));
    }
}
