//! User-friendly diagnostic messages.
//!
//! Every error surfaced to the user carries the root cause, the context that
//! was searched, and suggested fixes.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion to override the detected target.
    pub const OVERRIDE_TARGET: &str =
        "Pass --platform/--arch if the detected target is not the one you built for";

    /// Suggestion to move resolution failure to link time.
    pub const DEFER_MISSING: &str =
        "Set `build.on-missing = \"defer\"` in .speechcore/build.toml to let the linker report it";
}

/// An error message with optional code, context and suggestions.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Stable error code, e.g. `speechcore::resolve::library_not_found`
    pub code: Option<String>,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let label = match &self.code {
            Some(code) => format!("error[{}]", code),
            None => "error".to_string(),
        };
        if color {
            output.push_str(&format!("\x1b[1;31m{}\x1b[0m: {}\n", label, self.message));
        } else {
            output.push_str(&format!("{}: {}\n", label, self.message));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
