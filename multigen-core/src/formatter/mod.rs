//! Post-processing of generated content before it is written.
//!
//! A [`Formatter`] is a pure function from raw generated text to formatted
//! text. Every task carries one; the default is [`RawFormatter`], which hands
//! the input back untouched. Formatters may reject input they cannot parse,
//! in which case nothing is written for the element.
//!
//! - [`RawFormatter`] - identity pass-through
//! - [`Pep8Formatter`] - PEP 8 style normalization for Python sources
//! - [`CommandFormatter`] - pipes content through an external program
//!
//! Plain closures of type `Fn(&str) -> Result<String, FormatError>` are
//! formatters too.

mod command;
mod pep8;

use std::borrow::Cow;

pub use command::CommandFormatter;
use miette::Diagnostic;
pub use pep8::{Pep8Formatter, format_pep8};
use thiserror::Error;

/// Converts a task's raw output into its final, formatted form.
pub trait Formatter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    /// Format raw content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid input for this formatter.
    fn format<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String, FormatError> + Send + Sync,
{
    fn format<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, FormatError> {
        self(raw).map(Cow::Owned)
    }
}

/// Identity formatting: returns the very same string slice.
pub fn format_raw(raw: &str) -> Cow<'_, str> {
    Cow::Borrowed(raw)
}

/// Formatter that passes content through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn name(&self) -> &str {
        "raw"
    }

    fn format<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, FormatError> {
        Ok(format_raw(raw))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("line {line}: {message}")]
    #[diagnostic(code(multigen::format::malformed))]
    Malformed { line: usize, message: String },

    #[error("failed to run formatter '{program}'")]
    #[diagnostic(
        code(multigen::format::spawn),
        help("make sure '{program}' is installed and on PATH")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter '{program}' exited with {status}: {stderr}")]
    #[diagnostic(code(multigen::format::failed))]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("formatter '{program}' produced invalid UTF-8")]
    #[diagnostic(code(multigen::format::utf8))]
    Utf8 {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl FormatError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UGLY_CODE: &str = "import  a ,  b";

    #[test]
    fn test_format_raw_returns_same_slice() {
        let formatted = format_raw(UGLY_CODE);

        assert!(matches!(formatted, Cow::Borrowed(s) if std::ptr::eq(s, UGLY_CODE)));
    }

    #[test]
    fn test_raw_formatter_borrows_input() {
        let formatted = RawFormatter.format(UGLY_CODE).unwrap();

        assert!(matches!(formatted, Cow::Borrowed(s) if std::ptr::eq(s, UGLY_CODE)));
    }

    #[test]
    fn test_closure_formatter() {
        let upper = |raw: &str| -> Result<String, FormatError> { Ok(raw.to_uppercase()) };

        assert_eq!(upper.format("abc").unwrap(), "ABC");
        assert_eq!(Formatter::name(&upper), "custom");
    }

    #[test]
    fn test_closure_formatter_error() {
        let reject =
            |_: &str| -> Result<String, FormatError> { Err(FormatError::malformed(3, "nope")) };

        let err = reject.format("abc").unwrap_err();
        assert_eq!(err.to_string(), "line 3: nope");
    }
}
