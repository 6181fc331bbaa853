//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, TaskSummary};
pub use generate::GenerateReport;
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
