use std::path::Path;

use multigen_core::{Error, Result};
use tera::{Context, Tera};
use tracing::{debug, trace};

use crate::TemplateContext;

/// Template engine seam used by template file tasks.
pub trait Renderer {
    /// Render the template registered as `template_name` with `context`.
    fn render(&self, template_name: &str, context: &TemplateContext) -> Result<String>;
}

impl<F> Renderer for F
where
    F: Fn(&str, &TemplateContext) -> Result<String>,
{
    fn render(&self, template_name: &str, context: &TemplateContext) -> Result<String> {
        self(template_name, context)
    }
}

/// [`Renderer`] backed by a set of Tera templates.
///
/// Autoescaping is disabled: generated files are source code, not markup.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Load every file below `dir`, named by its path relative to `dir`.
    pub fn from_dir(dir: &Path) -> std::result::Result<Self, tera::Error> {
        if !dir.is_dir() {
            return Err(tera::Error::msg(format!(
                "template directory '{}' does not exist",
                dir.display()
            )));
        }

        let pattern = format!("{}/**/*", dir.display());
        let tera = Tera::new(&pattern)?;
        debug!(
            dir = %dir.display(),
            count = tera.get_template_names().count(),
            "loaded templates"
        );
        Ok(Self::from_tera(tera))
    }

    /// Build from in-memory `(name, source)` pairs.
    pub fn from_templates<N, S>(
        templates: impl IntoIterator<Item = (N, S)>,
    ) -> std::result::Result<Self, tera::Error>
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        Ok(Self::from_tera(tera))
    }

    pub fn from_tera(mut tera: Tera) -> Self {
        tera.autoescape_on(Vec::new());
        Self { tera }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, template_name: &str, context: &TemplateContext) -> Result<String> {
        trace!(template = template_name, "rendering");
        let context =
            Context::from_serialize(context).map_err(|e| Error::render(template_name, e))?;
        self.tera
            .render(template_name, &context)
            .map_err(|e| Error::render(template_name, e))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::{ContextMap, GlobalContext};

    fn context(element: serde_json::Value) -> TemplateContext {
        let global = GlobalContext::new().with("project", "demo");
        TemplateContext::build(&element, ContextMap::new(), &global).unwrap()
    }

    #[test]
    fn test_render_in_memory_template() {
        let renderer = TeraRenderer::from_templates([(
            "class.py",
            "# {{ project }}\nclass {{ element.name }}:\n    pass",
        )])
        .unwrap();

        let output = renderer
            .render("class.py", &context(json!({"name": "Point"})))
            .unwrap();

        insta::assert_snapshot!(output, @r"
        # demo
        class Point:
            pass
        ");
    }

    #[test]
    fn test_no_autoescape() {
        let renderer =
            TeraRenderer::from_templates([("page.html", "{{ element }}")]).unwrap();

        let output = renderer.render("page.html", &context(json!("a < b"))).unwrap();

        assert_eq!(output, "a < b");
    }

    #[test]
    fn test_unknown_template() {
        let renderer = TeraRenderer::from_templates([("a", "x")]).unwrap();

        let err = renderer.render("missing", &context(json!(1))).unwrap_err();

        assert!(matches!(err, Error::Render { ref template, .. } if template == "missing"));
    }

    #[test]
    fn test_from_dir_names_templates_by_relative_path() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("python")).unwrap();
        fs::write(temp.path().join("python/module.py"), "{{ element }}").unwrap();
        fs::write(temp.path().join("readme.md"), "# {{ project }}").unwrap();

        let renderer = TeraRenderer::from_dir(temp.path()).unwrap();

        assert_eq!(renderer.template_names(), vec!["python/module.py", "readme.md"]);
        assert!(renderer.has_template("readme.md"));
    }

    #[test]
    fn test_from_missing_dir() {
        let temp = TempDir::new().unwrap();

        let err = TeraRenderer::from_dir(&temp.path().join("templates")).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_closure_renderer() {
        let renderer = |name: &str, ctx: &TemplateContext| -> Result<String> {
            Ok(format!("{name}:{}", ctx["project"]))
        };

        let output = renderer.render("t", &context(json!(null))).unwrap();

        assert_eq!(output, "t:\"demo\"");
    }
}
