//! PEP 8 style normalization for generated Python sources.
//!
//! Covers the whitespace rules generated code typically breaks:
//!
//! - E401: one import per line (`import a, b` becomes two statements)
//! - E201/E202/E203: no whitespace inside brackets or before `,` `;` `:`,
//!   except that a slice colon keeps the same spacing on both sides
//! - E231: one space after a comma
//! - E221/E222: runs of whitespace between tokens collapse to one space
//! - E261: two spaces before an inline comment
//! - E303: at most two consecutive blank lines
//! - W191/W291/W391/W292: tabs in indentation, trailing whitespace, trailing
//!   blank lines, missing final newline
//!
//! String literals (including multi-line triple-quoted ones) and comments are
//! kept verbatim. Lines joined by a trailing backslash are never split.
//! Unbalanced brackets and unterminated strings are rejected.

use std::borrow::Cow;

use super::{FormatError, Formatter};

const INDENT: &str = "    ";
const MAX_BLANK_LINES: usize = 2;

/// Formatter applying [`format_pep8`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pep8Formatter;

impl Formatter for Pep8Formatter {
    fn name(&self) -> &str {
        "pep8"
    }

    fn format<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, FormatError> {
        format_pep8(raw).map(Cow::Owned)
    }
}

/// Normalize Python source according to the PEP 8 whitespace rules.
///
/// # Errors
///
/// Returns [`FormatError::Malformed`] for unbalanced brackets and
/// unterminated string literals.
pub fn format_pep8(raw: &str) -> Result<String, FormatError> {
    let mut normalizer = Normalizer::default();
    for (index, line) in raw.lines().enumerate() {
        normalizer.push_line(index + 1, line)?;
    }
    normalizer.finish()
}

#[derive(Debug, Clone, Copy)]
struct OpenString {
    quote: char,
    triple: bool,
    line: usize,
}

#[derive(Debug, Default)]
struct Normalizer {
    lines: Vec<String>,
    brackets: Vec<(char, usize)>,
    string: Option<OpenString>,
    blank_run: usize,
    /// The previous line ended with a backslash outside strings and comments.
    continuation: bool,
}

impl Normalizer {
    fn push_line(&mut self, lineno: usize, line: &str) -> Result<(), FormatError> {
        let starts_in_string = self.string.is_some();
        let logical_start = !starts_in_string && self.brackets.is_empty() && !self.continuation;

        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len());
        let mut i = 0;

        if !starts_in_string {
            while let Some(&c) = chars.get(i).filter(|c| **c == ' ' || **c == '\t') {
                out.push_str(if c == '\t' { INDENT } else { " " });
                i += 1;
            }
        }
        let indent_len = out.len();
        let mut pending_space = false;
        let mut commented = false;

        while i < chars.len() {
            let c = chars[i];

            if let Some(open) = self.string {
                out.push(c);
                i += 1;
                if c == '\\' {
                    if let Some(&escaped) = chars.get(i) {
                        out.push(escaped);
                        i += 1;
                    }
                } else if c == open.quote {
                    if !open.triple {
                        self.string = None;
                    } else if chars.get(i) == Some(&c) && chars.get(i + 1) == Some(&c) {
                        out.push(c);
                        out.push(c);
                        i += 2;
                        self.string = None;
                    }
                }
                continue;
            }

            match c {
                ' ' | '\t' => {
                    pending_space = true;
                    i += 1;
                }
                '#' => {
                    if out.len() > indent_len {
                        out.push_str("  ");
                    }
                    out.extend(&chars[i..]);
                    commented = true;
                    break;
                }
                '\'' | '"' => {
                    push_space(&mut out, indent_len, pending_space);
                    pending_space = false;
                    let triple = chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c);
                    let width = if triple { 3 } else { 1 };
                    out.extend(&chars[i..i + width]);
                    i += width;
                    self.string = Some(OpenString {
                        quote: c,
                        triple,
                        line: lineno,
                    });
                }
                '(' | '[' | '{' => {
                    push_space(&mut out, indent_len, pending_space);
                    pending_space = false;
                    out.push(c);
                    self.brackets.push((c, lineno));
                    i += 1;
                }
                ')' | ']' | '}' => {
                    pending_space = false;
                    self.close_bracket(lineno, c)?;
                    out.push(c);
                    i += 1;
                }
                ',' => {
                    out.push(c);
                    pending_space = true;
                    i += 1;
                }
                ':' if pending_space && self.in_subscript() => {
                    push_space(&mut out, indent_len, true);
                    out.push(c);
                    pending_space = out.ends_with(" :");
                    i += 1;
                }
                ';' | ':' => {
                    pending_space = false;
                    out.push(c);
                    i += 1;
                }
                _ => {
                    push_space(&mut out, indent_len, pending_space);
                    pending_space = false;
                    out.push(c);
                    i += 1;
                }
            }
        }

        if let Some(open) = self.string {
            if !open.triple && !line.ends_with('\\') {
                return Err(FormatError::malformed(
                    open.line,
                    "unterminated string literal",
                ));
            }
        }

        let ends_in_string = self.string.is_some();
        if !ends_in_string {
            out.truncate(out.trim_end().len());
        }
        let continues = !ends_in_string && !commented && out.ends_with('\\');
        self.continuation = continues;

        if starts_in_string || ends_in_string {
            self.blank_run = 0;
            self.lines.push(out);
            return Ok(());
        }

        if out.is_empty() {
            self.blank_run += 1;
            if self.blank_run <= MAX_BLANK_LINES {
                self.lines.push(out);
            }
            return Ok(());
        }
        self.blank_run = 0;

        if logical_start && !continues && self.brackets.is_empty() {
            if let Some(split) = split_imports(&out, indent_len) {
                self.lines.extend(split);
                return Ok(());
            }
        }
        self.lines.push(out);
        Ok(())
    }

    fn in_subscript(&self) -> bool {
        self.brackets.last().is_some_and(|&(open, _)| open == '[')
    }

    fn close_bracket(&mut self, lineno: usize, close: char) -> Result<(), FormatError> {
        let expected = match close {
            ')' => '(',
            ']' => '[',
            _ => '{',
        };
        match self.brackets.pop() {
            Some((open, _)) if open == expected => Ok(()),
            Some((open, line)) => Err(FormatError::malformed(
                lineno,
                format!("closing '{close}' does not match '{open}' opened on line {line}"),
            )),
            None => Err(FormatError::malformed(lineno, format!("unmatched '{close}'"))),
        }
    }

    fn finish(mut self) -> Result<String, FormatError> {
        if let Some(open) = self.string {
            return Err(FormatError::malformed(
                open.line,
                "unterminated triple-quoted string",
            ));
        }
        if let Some((open, line)) = self.brackets.pop() {
            return Err(FormatError::malformed(
                line,
                format!("'{open}' was never closed"),
            ));
        }

        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            return Ok(String::new());
        }

        let mut result = self.lines.join("\n");
        result.push('\n');
        Ok(result)
    }
}

/// Emit a single separating space, unless at the start of the code or right
/// after an opening bracket.
fn push_space(out: &mut String, indent_len: usize, pending: bool) {
    if pending && out.len() > indent_len && !out.ends_with(['(', '[', '{']) {
        out.push(' ');
    }
}

/// Split `import a, b` into one statement per module.
fn split_imports(line: &str, indent_len: usize) -> Option<Vec<String>> {
    let (indent, code) = line.split_at(indent_len);
    let modules = code.strip_prefix("import ")?;
    if !modules.contains(',') || modules.contains('#') {
        return None;
    }
    Some(
        modules
            .split(',')
            .map(str::trim)
            .filter(|module| !module.is_empty())
            .map(|module| format!("{indent}import {module}"))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_combined_imports() {
        assert_eq!(format_pep8("import  a ,  b").unwrap(), "import a\nimport b\n");
    }

    #[test]
    fn test_from_import_kept_on_one_line() {
        assert_eq!(
            format_pep8("from os import  path,sep").unwrap(),
            "from os import path, sep\n"
        );
    }

    #[test]
    fn test_indented_imports_keep_indentation() {
        assert_eq!(
            format_pep8("def f():\n\timport a,b as c\n").unwrap(),
            "def f():\n    import a\n    import b as c\n"
        );
    }

    #[test]
    fn test_backslash_continuation_not_split() {
        assert_eq!(
            format_pep8("import a, \\\n    b\n").unwrap(),
            "import a, \\\n    b\n"
        );
        assert_eq!(
            format_pep8("x = 1 + \\\n    2\nimport a,b\n").unwrap(),
            "x = 1 + \\\n    2\nimport a\nimport b\n"
        );
    }

    #[test]
    fn test_backslash_in_comment_is_not_continuation() {
        assert_eq!(
            format_pep8("# see a\\\nimport a,b\n").unwrap(),
            "# see a\\\nimport a\nimport b\n"
        );
    }

    #[test]
    fn test_slice_colon_spacing_is_symmetric() {
        assert_eq!(format_pep8("x = a[1 : 2]").unwrap(), "x = a[1 : 2]\n");
        assert_eq!(format_pep8("x = a[1 :2]").unwrap(), "x = a[1 : 2]\n");
        assert_eq!(format_pep8("x = a[1:2]").unwrap(), "x = a[1:2]\n");
        assert_eq!(format_pep8("d = {1 : 2}").unwrap(), "d = {1: 2}\n");
        assert_eq!(format_pep8("def f(x : int): pass").unwrap(), "def f(x: int): pass\n");
    }

    #[test]
    fn test_bracket_and_comma_spacing() {
        let raw = "def f( x ,y ):\n\treturn x+y   \n\n\n\n\nprint(f(1,2))";

        assert_eq!(
            format_pep8(raw).unwrap(),
            "def f(x, y):\n    return x+y\n\n\nprint(f(1, 2))\n"
        );
    }

    #[test]
    fn test_inline_comment_spacing() {
        assert_eq!(format_pep8("x = 1 # note").unwrap(), "x = 1  # note\n");
        assert_eq!(format_pep8("# a ,  b").unwrap(), "# a ,  b\n");
    }

    #[test]
    fn test_string_literals_verbatim() {
        assert_eq!(
            format_pep8("s = 'a  ,  b' ,  'it\\'s'").unwrap(),
            "s = 'a  ,  b', 'it\\'s'\n"
        );
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let raw = "x = \"\"\"a  ,  b   \n\n\n\n   c  \"\"\"\n";

        assert_eq!(
            format_pep8(raw).unwrap(),
            "x = \"\"\"a  ,  b   \n\n\n\n   c  \"\"\"\n"
        );
    }

    #[test]
    fn test_trailing_blank_lines_removed() {
        assert_eq!(format_pep8("pass\n\n\n").unwrap(), "pass\n");
        assert_eq!(format_pep8("\n\n").unwrap(), "");
        assert_eq!(format_pep8("").unwrap(), "");
    }

    #[test]
    fn test_multiline_call_keeps_continuation() {
        assert_eq!(
            format_pep8("call(a ,\n     b )").unwrap(),
            "call(a,\n     b)\n"
        );
    }

    #[test]
    fn test_unclosed_bracket_rejected() {
        let err = format_pep8("x = 1\nprint((1, 2)").unwrap_err();

        assert!(matches!(err, FormatError::Malformed { line: 2, .. }));
        assert_eq!(err.to_string(), "line 2: '(' was never closed");
    }

    #[test]
    fn test_unmatched_closing_bracket_rejected() {
        let err = format_pep8("foo)").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unmatched ')'");

        let err = format_pep8("foo(]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: closing ']' does not match '(' opened on line 1"
        );
    }

    #[test]
    fn test_unterminated_string_rejected() {
        let err = format_pep8("x = 'abc\ny = 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unterminated string literal");

        let err = format_pep8("x = \"\"\"abc\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unterminated triple-quoted string");
    }
}
