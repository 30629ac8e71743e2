//! Console output.
//!
//! Verdict lines go to one writer (stdout in the binary), provisioning
//! warnings and errors to another (stderr). Colors come from an injected
//! [`Palette`].

use std::io::{self, Write};

use crate::prober::Verdict;
use crate::types::ProbeTarget;

/// ANSI escape sequences used for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Success glyph color.
    pub success: &'static str,
    /// Failure glyph and error color.
    pub failure: &'static str,
    /// Warning color.
    pub warning: &'static str,
    /// Reset sequence.
    pub reset: &'static str,
}

impl Palette {
    /// Bright green, red and yellow.
    pub const ANSI: Self = Self {
        success: "\x1b[92m",
        failure: "\x1b[91m",
        warning: "\x1b[93m",
        reset: "\x1b[0m",
    };

    /// No escape sequences.
    pub const PLAIN: Self = Self {
        success: "",
        failure: "",
        warning: "",
        reset: "",
    };

    /// Pick the palette for the given color setting.
    #[must_use]
    pub fn for_color(color: bool) -> Self {
        if color { Self::ANSI } else { Self::PLAIN }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ANSI
    }
}

const SUCCESS_GLYPH: &str = "✓";
const FAILURE_GLYPH: &str = "✗";

/// Writes run output.
#[derive(Debug)]
pub struct Reporter<O, E> {
    out: O,
    err: E,
    palette: Palette,
}

impl Reporter<io::Stdout, io::Stderr> {
    /// A reporter on the process stdout/stderr.
    #[must_use]
    pub fn stdio(palette: Palette) -> Self {
        Self::new(io::stdout(), io::stderr(), palette)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// A reporter writing verdicts to `out` and diagnostics to `err`.
    pub fn new(out: O, err: E, palette: Palette) -> Self {
        Self { out, err, palette }
    }

    /// Heading printed before the first verdict.
    pub fn begin(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nChecking emails...\n")
    }

    /// Trailing blank line after the last verdict.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    /// One verdict line.
    pub fn verdict(&mut self, target: &ProbeTarget, verdict: &Verdict) -> io::Result<()> {
        let (color, glyph) = if verdict.is_found() {
            (self.palette.success, SUCCESS_GLYPH)
        } else {
            (self.palette.failure, FAILURE_GLYPH)
        };
        writeln!(
            self.out,
            "{color}{glyph}{reset} {target} ({message})",
            reset = self.palette.reset,
            message = verdict.message(),
        )?;
        self.out.flush()
    }

    /// A non-fatal warning.
    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.err,
            "{}Warning: {message}{}",
            self.palette.warning, self.palette.reset
        )
    }

    /// An error message.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "{}{message}{}", self.palette.failure, self.palette.reset)
    }

    /// Consume the reporter, returning its writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
