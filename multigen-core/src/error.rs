use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::formatter::FormatError;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by an external collaborator (template engine, model access).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to create directory '{}'", path.display())]
    #[diagnostic(code(multigen::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(code(multigen::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to format '{}'", path.display())]
    #[diagnostic(
        code(multigen::format),
        help("the formatter rejected the generated content; check the template output")
    )]
    Formatting {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("failed to render template '{template}'")]
    #[diagnostic(code(multigen::render))]
    Render {
        template: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to compute output path in task '{task}'")]
    #[diagnostic(code(multigen::path))]
    Path {
        task: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Wrap a template engine failure.
    pub fn render(template: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Render {
            template: template.into(),
            source: source.into(),
        }
    }

    /// Wrap a path computation failure.
    pub fn path(task: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Path {
            task: task.into(),
            source: source.into(),
        }
    }
}
