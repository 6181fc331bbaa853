//! The `multigen.toml` project manifest.

mod file;
mod parse;
mod validate;

use std::path::{Path, PathBuf};

pub use file::ManifestFile;
pub use parse::parse_manifest;
use serde::Deserialize;
use toml::Spanned;

/// Root of `multigen.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Tasks, in execution order.
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

/// `[generator]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Template directory, relative to the manifest.
    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    /// Fixed global context. When absent, the generator builds its own.
    #[serde(default)]
    pub global_context: Option<toml::Table>,
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            global_context: None,
        }
    }
}

/// One `[[tasks]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    pub name: Spanned<String>,

    /// Template rendered once per selected element.
    pub template: Spanned<String>,

    /// Element kind to select; all elements when absent.
    #[serde(default)]
    pub select: Option<String>,

    /// Output path template, rendered with the element only.
    pub path: Spanned<String>,

    #[serde(default)]
    pub formatter: Option<Spanned<FormatterKind>>,

    /// External formatter: program followed by its arguments.
    #[serde(default)]
    pub format_command: Option<Spanned<Vec<String>>>,
}

impl TaskConfig {
    pub fn name(&self) -> &str {
        self.name.get_ref()
    }

    pub fn template(&self) -> &str {
        self.template.get_ref()
    }

    pub fn path(&self) -> &str {
        self.path.get_ref()
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    /// The formatter to apply to rendered content.
    pub fn formatter(&self) -> FormatterConfig<'_> {
        if let Some(argv) = &self.format_command {
            return FormatterConfig::Command(argv.get_ref());
        }
        match self.formatter.as_ref().map(|f| *f.get_ref()) {
            Some(FormatterKind::Pep8) => FormatterConfig::Pep8,
            Some(FormatterKind::Raw) | None => FormatterConfig::Raw,
        }
    }
}

/// Built-in formatters selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    Raw,
    Pep8,
}

/// Resolved formatter choice of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterConfig<'a> {
    Raw,
    Pep8,
    Command(&'a [String]),
}

impl Manifest {
    /// Template directory resolved against `manifest_dir`.
    pub fn templates_dir(&self, manifest_dir: &Path) -> PathBuf {
        manifest_dir.join(&self.generator.templates)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(TaskConfig::name)
    }
}
