//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Resolved template directory.
    pub templates_dir: PathBuf,
    /// Configured tasks, in execution order.
    pub tasks: Vec<TaskSummary>,
    /// Problems that would make generation fail.
    pub errors: Vec<String>,
}

/// One configured task.
#[derive(Debug)]
pub struct TaskSummary {
    pub name: String,
    pub template: String,
    pub path: String,
    pub select: Option<String>,
    pub formatter: String,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("Templates", &self.templates_dir.display().to_string());

        let count = self.tasks.len();
        out.section(&format!("{} task{}", count, if count == 1 { "" } else { "s" }));
        for task in &self.tasks {
            out.list_item(&format!(
                "{}: {} -> {} (select: {}, formatter: {})",
                task.name,
                task.template,
                task.path,
                task.select.as_deref().unwrap_or("all"),
                task.formatter
            ));
        }
    }
}
