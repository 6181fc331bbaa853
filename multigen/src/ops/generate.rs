//! Generate operation - render every configured task over the model.

use std::path::Path;

use eyre::{Context, Result};
use multigen_manifest::{ManifestFile, Model, table_to_json};
use multigen_template::{GlobalContext, TemplateGenerator, TeraRenderer};
use serde_json::json;
use tracing::info;

use crate::{reports::GenerateReport, task::ConfiguredTask};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Folder generated paths are resolved against.
    pub output_dir: &'a Path,
    /// Whether to only list the files without writing them.
    pub dry_run: bool,
}

/// Global context used when the manifest does not define one.
pub fn default_global_context() -> GlobalContext {
    GlobalContext::new().with(
        "generator",
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Convert the manifest's `[generator.global_context]` table.
pub fn global_context_from_table(table: &toml::Table) -> GlobalContext {
    GlobalContext::from_extras(table_to_json(table))
}

/// Build the template generator described by `file`.
pub fn build_generator(file: &ManifestFile) -> Result<TemplateGenerator<Model>> {
    let manifest = file.manifest();
    let templates_dir = file.templates_dir();
    let renderer = TeraRenderer::from_dir(&templates_dir)
        .wrap_err_with(|| format!("Failed to load templates from {}", templates_dir.display()))?;

    let global_context = manifest
        .generator
        .global_context
        .as_ref()
        .map(global_context_from_table);

    let mut generator =
        TemplateGenerator::with_context_factory(renderer, global_context, default_global_context);
    for config in &manifest.tasks {
        generator = generator.task(ConfiguredTask::from_config(config)?);
    }
    Ok(generator)
}

/// Execute the generate operation.
pub fn generate(file: &ManifestFile, model: &Model, opts: GenerateOptions) -> Result<GenerateReport> {
    let generator = build_generator(file)?;
    info!(
        tasks = generator.len(),
        elements = model.len(),
        dry_run = opts.dry_run,
        "generator ready"
    );

    let report = if opts.dry_run {
        generator.plan(model, opts.output_dir)
    } else {
        generator.generate(model, opts.output_dir)
    }
    .wrap_err("Failed to generate code")?;

    Ok(GenerateReport {
        output_dir: opts.output_dir.to_path_buf(),
        dry_run: opts.dry_run,
        tasks: report.tasks,
    })
}
