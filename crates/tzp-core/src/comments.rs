//! # Commentary Stream
//!
//! A write-only, line-oriented mirror of the binary table. Every value the
//! assembler writes is echoed here as `// <indent><text>`, indented two
//! spaces per nesting level, so two tables can be compared with a plain
//! text diff. Nothing ever reads it back.

use std::fmt::{Display, Write as _};

const INDENT: &str = "  ";

/// Indenting commentary printer.
///
/// A `Comments::sink()` printer discards everything; use it when the caller
/// did not ask for commentary.
#[derive(Debug, Clone)]
pub struct Comments {
    out: Option<String>,
    depth: usize,
}

impl Comments {
    /// A printer that records every line.
    pub fn new() -> Self {
        Self {
            out: Some(String::new()),
            depth: 0,
        }
    }

    /// A printer that discards every line.
    pub fn sink() -> Self {
        Self {
            out: None,
            depth: 0,
        }
    }

    /// Whether lines are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Print one line at the current indentation.
    pub fn line(&mut self, text: impl Display) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        out.push_str("// ");
        for _ in 0..self.depth {
            out.push_str(INDENT);
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{text}");
        out.push('\n');
    }

    /// Increase the indentation of subsequent lines.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease the indentation of subsequent lines.
    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the printer, returning everything recorded.
    pub fn finish(self) -> String {
        self.out.unwrap_or_default()
    }
}

impl Default for Comments {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_prefixed_and_indented() {
        let mut c = Comments::new();
        c.line("Australia/Sydney");
        c.indent();
        c.line(format_args!("rawOffset: {}", 36_000_000));
        c.indent();
        c.line("nested");
        c.outdent();
        c.outdent();
        c.line("done");
        assert_eq!(
            c.finish(),
            "// Australia/Sydney\n//   rawOffset: 36000000\n//     nested\n// done\n"
        );
    }

    #[test]
    fn test_outdent_saturates() {
        let mut c = Comments::new();
        c.outdent();
        c.line("x");
        assert_eq!(c.finish(), "// x\n");
    }

    #[test]
    fn test_sink_discards() {
        let mut c = Comments::sink();
        assert!(!c.is_enabled());
        c.line("ignored");
        assert_eq!(c.finish(), "");
    }
}
