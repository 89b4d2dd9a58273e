//! Terminal rendering for build diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[R301]: synthesized artifact for `shop.Order` could not be resolved
///   --> shop.Order
///    = note: ...
///    = help: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renders a single diagnostic into a formatted string.
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        if self.color {
            let color = match diag.severity {
                Severity::Error => "31",
                Severity::Warning => "33",
                Severity::Note => "36",
            };
            out.push_str(&format!("\x1b[1;{color}m{header}\x1b[0m: {}\n", diag.message));
        } else {
            out.push_str(&format!("{header}: {}\n", diag.message));
        }

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;

    #[test]
    fn render_with_subject_and_notes() {
        let diag = Diagnostic::warning(codes::DUPLICATE_ARTIFACT_WRITE, "artifact written twice")
            .with_subject("shop/Order$SpurInstantiator")
            .with_note("payloads are identical")
            .with_help("synthesize each type once per build");

        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("warning[C101]: artifact written twice"));
        assert!(output.contains("--> shop/Order$SpurInstantiator"));
        assert!(output.contains("= note: payloads are identical"));
        assert!(output.contains("= help: synthesize each type once per build"));
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::error(codes::UNINITIALIZED_PROVIDER, "provider not started");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("error[P401]: provider not started"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn color_wraps_header() {
        let diag = Diagnostic::error(codes::ARTIFACT_RESOLUTION, "missing");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.starts_with("\x1b[1;31merror[R301]\x1b[0m"));
    }
}
