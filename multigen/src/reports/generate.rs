//! Generate command report data structures.

use std::path::PathBuf;

use multigen_core::TaskFiles;

use super::output::{Output, Report};

/// Report data from a generator run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output directory passed to the generator.
    pub output_dir: PathBuf,
    /// Whether paths were only planned.
    pub dry_run: bool,
    /// Files per task, in execution order.
    pub tasks: Vec<TaskFiles>,
}

impl GenerateReport {
    pub fn total(&self) -> usize {
        self.tasks.iter().map(|t| t.files.len()).sum()
    }
}

fn files(count: usize) -> String {
    format!("{} file{}", count, if count == 1 { "" } else { "s" })
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for task in self.tasks.iter().filter(|t| t.files.is_empty()) {
            out.warning(&format!("task '{}' selected no elements", task.task));
        }

        for task in self.tasks.iter().filter(|t| !t.files.is_empty()) {
            out.section(&format!("{} ({})", task.task, task.files.len()));
            for file in &task.files {
                let file = file.display().to_string();
                if self.dry_run {
                    out.list_item(&file);
                } else {
                    out.added_item(&file);
                }
            }
        }

        if self.dry_run {
            out.divider("Summary");
            out.preformatted(&format!("{} would be generated", files(self.total())));
        } else {
            out.newline();
            out.key_value(
                "Generated",
                &format!("{} in {}", files(self.total()), self.output_dir.display()),
            );
        }
    }
}
