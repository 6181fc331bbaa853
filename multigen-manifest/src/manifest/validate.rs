use std::collections::HashMap;

use super::Manifest;
use crate::{Result, error::SourceContext};

/// Semantic checks that serde cannot express.
pub(super) fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let mut seen = HashMap::new();

    for task in &manifest.tasks {
        let name = task.name();
        if name.trim().is_empty() {
            return Err(ctx.validation_error_at("task name must not be empty", task.name.span()));
        }
        if let Some(first) = seen.insert(name, task.name.span()) {
            return Err(ctx.duplicate_task_error(name, first, task.name.span()));
        }

        if task.template().trim().is_empty() {
            return Err(ctx.validation_error_at(
                format!("task '{name}' has an empty template name"),
                task.template.span(),
            ));
        }
        if task.path().trim().is_empty() {
            return Err(ctx.validation_error_at(
                format!("task '{name}' has an empty output path"),
                task.path.span(),
            ));
        }

        if let Some(argv) = &task.format_command {
            if task.formatter.is_some() {
                return Err(ctx.validation_error_at(
                    format!("task '{name}' sets both 'formatter' and 'format_command'"),
                    argv.span(),
                ));
            }
            if argv.get_ref().first().is_none_or(|p| p.trim().is_empty()) {
                return Err(ctx.validation_error_at(
                    format!("task '{name}' has an empty 'format_command'"),
                    argv.span(),
                ));
            }
        }
    }
    Ok(())
}
