//! Tasks defined by `[[tasks]]` entries of multigen.toml.

use std::path::PathBuf;

use eyre::{Context as _, Result, eyre};
use multigen_core::{CommandFormatter, Error, Formatter, Pep8Formatter, RawFormatter};
use multigen_manifest::{Element, FormatterConfig, Model, TaskConfig};
use multigen_template::{ELEMENT_KEY, TemplateFileTask};
use tera::{Context, Tera};

const PATH_TEMPLATE: &str = "path";

/// A template task built from manifest configuration.
pub(crate) struct ConfiguredTask {
    name: String,
    template: String,
    select: Option<String>,
    path: Tera,
    formatter: Box<dyn Formatter>,
}

impl ConfiguredTask {
    pub fn from_config(config: &TaskConfig) -> Result<Self> {
        let mut path = Tera::default();
        path.autoescape_on(Vec::new());
        path.add_raw_template(PATH_TEMPLATE, config.path())
            .wrap_err_with(|| format!("invalid path template in task '{}'", config.name()))?;

        let formatter: Box<dyn Formatter> = match config.formatter() {
            FormatterConfig::Raw => Box::new(RawFormatter),
            FormatterConfig::Pep8 => Box::new(Pep8Formatter),
            FormatterConfig::Command(argv) => Box::new(
                CommandFormatter::from_argv(argv)
                    .ok_or_else(|| eyre!("task '{}' has an empty format command", config.name()))?,
            ),
        };

        Ok(Self {
            name: config.name().to_string(),
            template: config.template().to_string(),
            select: config.select().map(str::to_string),
            path,
            formatter,
        })
    }
}

impl TemplateFileTask<Model> for ConfiguredTask {
    type Element = Element;

    fn name(&self) -> &str {
        &self.name
    }

    fn template_name(&self) -> &str {
        &self.template
    }

    fn filtered_elements<'a>(
        &'a self,
        model: &'a Model,
    ) -> Box<dyn Iterator<Item = &'a Element> + 'a> {
        match &self.select {
            Some(kind) => Box::new(model.of_kind(kind)),
            None => Box::new(model.elements().iter()),
        }
    }

    fn relative_path_for_element(&self, element: &Element) -> multigen_core::Result<PathBuf> {
        let mut context = Context::new();
        context.insert(ELEMENT_KEY, element);

        let rendered = self
            .path
            .render(PATH_TEMPLATE, &context)
            .map_err(|e| Error::path(&self.name, e))?;
        let rendered = rendered.trim();
        if rendered.is_empty() {
            return Err(Error::path(
                &self.name,
                format!("path rendered empty for element '{}'", element.name),
            ));
        }
        Ok(PathBuf::from(rendered))
    }

    fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }
}
