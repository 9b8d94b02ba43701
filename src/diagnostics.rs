//! Non-fatal diagnostics raised during extraction.
//!
//! Extraction never aborts on a malformed call site or a merge conflict; it
//! drops or degrades the candidate and reports what happened through a
//! caller-supplied [`Reporter`]. Only source files that fail to parse abort a
//! run, and those travel as `anyhow` errors instead.

use std::fmt;

use colored::Colorize;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth surfacing to the user; processing continues.
    Warning,
    /// Skipped or degraded candidate; interesting when debugging a run.
    Debug,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Debug => write!(f, "debug"),
        }
    }
}

/// A non-fatal condition observed while extracting messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two different plural forms were merged under the same singular key.
    /// The first-seen plural wins.
    PluralConflict {
        singular: String,
        existing: String,
        incoming: String,
    },

    /// A recognized translation call carried no arguments.
    MissingArguments { location: String },

    /// The first argument did not flatten to literal text, so the candidate
    /// was dropped.
    EmptySingular { location: String },

    /// An expression shape the flattener does not understand; it degrades to
    /// empty text.
    UnhandledExpression {
        file: String,
        kind: &'static str,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::PluralConflict { .. } => Severity::Warning,
            Diagnostic::MissingArguments { .. }
            | Diagnostic::EmptySingular { .. }
            | Diagnostic::UnhandledExpression { .. } => Severity::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PluralConflict {
                singular,
                existing,
                incoming,
            } => write!(
                f,
                "\"{}\" and \"{}\" are different plurals for the same singular key (\"{}\"). \
                 Use contexts to differentiate them.",
                existing, incoming, singular
            ),
            Diagnostic::MissingArguments { location } => {
                write!(f, "No arguments to translation method at {}", location)
            }
            Diagnostic::EmptySingular { location } => {
                write!(f, "No literal singular text at {}", location)
            }
            Diagnostic::UnhandledExpression { file, kind } => {
                write!(f, "Found unhandled {} in {}", kind, file)
            }
        }
    }
}

/// Destination for diagnostics.
///
/// The extractors and the [`Collector`](crate::collector::Collector) report
/// through this trait instead of logging ambiently, so library users decide
/// what (if anything) reaches the terminal.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Prints diagnostics to stderr in a cargo-style format.
///
/// Debug-level diagnostics are only printed when `verbose` is set.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        let severity = diagnostic.severity();
        if severity == Severity::Debug && !self.verbose {
            return;
        }
        let severity_str = match severity {
            Severity::Warning => "warning".bold().yellow(),
            Severity::Debug => "debug".dimmed(),
        };
        eprintln!("{}: {}", severity_str, diagnostic);
    }
}

/// Collects diagnostics in memory.
///
/// Used by the parallel pipeline to keep per-file diagnostics ordered before
/// replaying them into the caller's reporter, and by tests to assert on what
/// was reported.
#[derive(Debug, Default)]
pub struct DiagnosticBuffer {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for DiagnosticBuffer {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_conflict_is_warning() {
        let diagnostic = Diagnostic::PluralConflict {
            singular: "item".to_string(),
            existing: "items".to_string(),
            incoming: "itemz".to_string(),
        };
        assert_eq!(diagnostic.severity(), Severity::Warning);
        let rendered = diagnostic.to_string();
        assert!(rendered.contains("\"items\" and \"itemz\""));
        assert!(rendered.contains("Use contexts"));
    }

    #[test]
    fn test_buffer_preserves_order() {
        let mut buffer = DiagnosticBuffer::new();
        buffer.report(Diagnostic::MissingArguments {
            location: "a.js".to_string(),
        });
        buffer.report(Diagnostic::EmptySingular {
            location: "a.js:3".to_string(),
        });
        let diagnostics = buffer.into_inner();
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::MissingArguments { .. }
        ));
    }
}
