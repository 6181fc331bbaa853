//! Multi-file code generation core.
//!
//! A [`Generator`] owns an ordered list of [`Task`]s. For a given model and
//! output folder, each task picks the model elements it applies to and
//! writes one file per element at a path it computes. Content passes through
//! the task's [`Formatter`] before it reaches the disk.
//!
//! # Module Organization
//!
//! - [`formatter`] - Content post-processing (identity, PEP 8, external command)
//! - `task` - The [`Task`] contract and its object-safe [`DynTask`] view
//! - `generator` - The [`Generator`] orchestrator and its [`GenerateReport`]

mod error;
mod file;
pub mod formatter;
mod generator;
mod task;

pub use error::{BoxError, Error, Result};
pub use file::ensure_folder;
pub use formatter::{
    CommandFormatter, FormatError, Formatter, Pep8Formatter, RawFormatter, format_pep8,
    format_raw,
};
pub use generator::{GenerateReport, Generator, TaskFiles};
pub use task::{DynTask, Task};
