//! Check operation - manifest and template validation.

use multigen_manifest::{FormatterConfig, ManifestFile, TaskConfig};
use multigen_template::TeraRenderer;

use crate::{
    reports::{CheckReport, TaskSummary},
    task::ConfiguredTask,
};

fn formatter_label(config: &TaskConfig) -> String {
    match config.formatter() {
        FormatterConfig::Raw => "raw".to_string(),
        FormatterConfig::Pep8 => "pep8".to_string(),
        FormatterConfig::Command(argv) => argv.join(" "),
    }
}

/// Execute the check operation.
///
/// Verifies that the template directory loads, that every task's template
/// exists, and that every path template compiles.
pub fn check(file: &ManifestFile) -> CheckReport {
    let manifest = file.manifest();
    let templates_dir = file.templates_dir();
    let mut errors = Vec::new();

    let renderer = match TeraRenderer::from_dir(&templates_dir) {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            errors.push(format!("{:#}", eyre::Report::new(e)));
            None
        }
    };

    let mut tasks = Vec::with_capacity(manifest.tasks.len());
    for config in &manifest.tasks {
        if let Some(renderer) = &renderer {
            if !renderer.has_template(config.template()) {
                errors.push(format!(
                    "task '{}': template '{}' not found in {}",
                    config.name(),
                    config.template(),
                    templates_dir.display()
                ));
            }
        }
        if let Err(e) = ConfiguredTask::from_config(config) {
            errors.push(format!("{e:#}"));
        }

        tasks.push(TaskSummary {
            name: config.name().to_string(),
            template: config.template().to_string(),
            path: config.path().to_string(),
            select: config.select().map(str::to_string),
            formatter: formatter_label(config),
        });
    }

    CheckReport {
        config_path: file.path().to_path_buf(),
        templates_dir,
        tasks,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn open(manifest: &str, templates: &[&str]) -> (TempDir, ManifestFile) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        for name in templates {
            fs::write(temp.path().join("templates").join(name), "{{ element.name }}").unwrap();
        }
        fs::write(temp.path().join("multigen.toml"), manifest).unwrap();
        let file = ManifestFile::open(temp.path().join("multigen.toml")).unwrap();
        (temp, file)
    }

    #[test]
    fn test_valid_project() {
        let (_temp, file) = open(
            r#"
            [[tasks]]
            name = "classes"
            template = "class.py"
            path = "{{ element.name }}.py"
            format_command = ["autopep8", "-"]
            "#,
            &["class.py"],
        );

        let report = check(&file);

        assert!(report.is_valid(), "{:?}", report.errors);
        assert_eq!(report.tasks[0].formatter, "autopep8 -");
        assert_eq!(report.tasks[0].select, None);
    }

    #[test]
    fn test_missing_template() {
        let (_temp, file) = open(
            "[[tasks]]\nname = \"t\"\ntemplate = \"nope.py\"\npath = \"x\"\n",
            &["class.py"],
        );

        let report = check(&file);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("task 't': template 'nope.py' not found"));
    }

    #[test]
    fn test_missing_templates_dir() {
        let (temp, file) = open(
            "[[tasks]]\nname = \"t\"\ntemplate = \"a\"\npath = \"x\"\n",
            &[],
        );
        fs::remove_dir(temp.path().join("templates")).unwrap();

        let report = check(&file);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("template directory"));
        assert!(report.errors[0].contains("does not exist"));
    }

    #[test]
    fn test_invalid_path_template() {
        let (_temp, file) = open(
            "[[tasks]]\nname = \"t\"\ntemplate = \"a\"\npath = \"{% if %}\"\n",
            &["a"],
        );

        let report = check(&file);

        assert!(!report.is_valid());
        assert!(report.errors[0].contains("invalid path template in task 't'"));
    }
}
