use std::{
    borrow::Cow,
    io::{ErrorKind, Write},
    process::{Command, Stdio},
    thread,
};

use super::{FormatError, Formatter};

/// Formatter that pipes content through an external program.
///
/// The program receives the raw content on stdin and must print the
/// formatted result on stdout, e.g. `rustfmt --emit stdout` or `autopep8 -`.
/// A non-zero exit status rejects the content.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a full argument vector; `None` if it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.as_str()).args(args.iter().cloned()))
    }

    /// Append arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Formatter for CommandFormatter {
    fn name(&self) -> &str {
        &self.program
    }

    fn format<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, FormatError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdin is fed from its own thread while stdout is drained
        let stdin = child.stdin.take();
        let output = thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(raw.as_bytes())));
            let output = child.wait_with_output();
            if let Some(Ok(Err(source))) = writer.map(|w| w.join()) {
                if source.kind() != ErrorKind::BrokenPipe {
                    return Err(source);
                }
            }
            output
        })
        .map_err(|source| FormatError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map(Cow::Owned)
            .map_err(|source| FormatError::Utf8 {
                program: self.program.clone(),
                source,
            })
    }
}
