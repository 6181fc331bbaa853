use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use multigen_core::{Error, Formatter, RawFormatter, Result, Task};
use serde::Serialize;

use crate::{ContextMap, GlobalContext, Renderer, TemplateContext};

/// Task that renders one template per element.
///
/// Implementors pick the template, the elements and the output paths. The
/// context each template sees is built by
/// [`TemplateFileTask::create_template_context`] from the element, the
/// task's [`TemplateFileTask::extra_context`] and the generator's global
/// context. Register implementors on a
/// [`TemplateGenerator`](crate::TemplateGenerator).
pub trait TemplateFileTask<M: ?Sized> {
    type Element: Serialize + fmt::Debug + ?Sized;

    /// Name used in logs and reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Name of the template rendered for each element.
    fn template_name(&self) -> &str;

    fn filtered_elements<'a>(
        &'a self,
        model: &'a M,
    ) -> Box<dyn Iterator<Item = &'a Self::Element> + 'a>;

    fn relative_path_for_element(&self, element: &Self::Element) -> Result<PathBuf>;

    fn formatter(&self) -> &dyn Formatter {
        &RawFormatter
    }

    /// Task-specific entries added to the template context of `element`.
    fn extra_context(&self, _element: &Self::Element) -> ContextMap {
        ContextMap::new()
    }

    /// Build the context for rendering `element`.
    ///
    /// Global entries are applied last and take precedence over `extra`.
    fn create_template_context(
        &self,
        element: &Self::Element,
        extra: ContextMap,
        global: &GlobalContext,
    ) -> Result<TemplateContext> {
        TemplateContext::build(element, extra, global)
            .map_err(|e| Error::render(self.template_name(), e))
    }
}

/// A [`TemplateFileTask`] bound to the global context and renderer of the
/// generator it was registered on.
pub struct TemplateTask<T> {
    task: T,
    global_context: Arc<GlobalContext>,
    renderer: Arc<dyn Renderer>,
}

impl<T> TemplateTask<T> {
    pub fn new(task: T, global_context: Arc<GlobalContext>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            task,
            global_context,
            renderer,
        }
    }

    pub fn global_context(&self) -> &Arc<GlobalContext> {
        &self.global_context
    }

    pub fn inner(&self) -> &T {
        &self.task
    }
}

impl<M, T> Task<M> for TemplateTask<T>
where
    M: ?Sized,
    T: TemplateFileTask<M>,
{
    type Element = T::Element;

    fn name(&self) -> &str {
        self.task.name()
    }

    fn filtered_elements<'a>(
        &'a self,
        model: &'a M,
    ) -> Box<dyn Iterator<Item = &'a Self::Element> + 'a> {
        self.task.filtered_elements(model)
    }

    fn relative_path_for_element(&self, element: &Self::Element) -> Result<PathBuf> {
        self.task.relative_path_for_element(element)
    }

    fn formatter(&self) -> &dyn Formatter {
        self.task.formatter()
    }

    fn generate_file(&self, element: &Self::Element, filepath: &Path) -> Result<()> {
        let extra = self.task.extra_context(element);
        let context = self
            .task
            .create_template_context(element, extra, &self.global_context)?;
        let raw = self.renderer.render(self.task.template_name(), &context)?;
        Task::<M>::write_formatted(self, &raw, filepath)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::TeraRenderer;

    struct Greeting;

    impl TemplateFileTask<[String]> for Greeting {
        type Element = str;

        fn template_name(&self) -> &str {
            "greeting.txt"
        }

        fn filtered_elements<'a>(
            &'a self,
            model: &'a [String],
        ) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            Box::new(model.iter().map(String::as_str))
        }

        fn relative_path_for_element(&self, element: &str) -> Result<PathBuf> {
            Ok(PathBuf::from(format!("{element}.txt")))
        }

        fn extra_context(&self, element: &str) -> ContextMap {
            ContextMap::from([("shout".to_string(), json!(element.to_uppercase()))])
        }
    }

    fn run(task: &TemplateTask<Greeting>, element: &str, outfolder: &Path) -> Result<PathBuf> {
        Task::<[String]>::run(task, element, outfolder)
    }

    fn bind<T>(task: T, global: GlobalContext) -> TemplateTask<T> {
        let renderer = TeraRenderer::from_templates([(
            "greeting.txt",
            "{{ greeting }}, {{ element }} ({{ shout }})",
        )])
        .unwrap();
        TemplateTask::new(task, Arc::new(global), Arc::new(renderer))
    }

    #[test]
    fn test_generate_file_renders_with_merged_context() {
        let temp = TempDir::new().unwrap();
        let task = bind(Greeting, GlobalContext::new().with("greeting", "Hello"));

        let written = run(&task, "world", temp.path()).unwrap();

        assert_eq!(written, temp.path().join("world.txt"));
        assert_eq!(
            fs::read_to_string(written).unwrap(),
            "Hello, world (WORLD)"
        );
    }

    #[test]
    fn test_global_overrides_task_extras() {
        let temp = TempDir::new().unwrap();
        let global = GlobalContext::new()
            .with("greeting", "Hi")
            .with("shout", "GLOBAL");
        let task = bind(Greeting, global);

        let written = run(&task, "you", temp.path()).unwrap();

        assert_eq!(fs::read_to_string(written).unwrap(), "Hi, you (GLOBAL)");
    }

    #[test]
    fn test_missing_variable_is_render_error() {
        let temp = TempDir::new().unwrap();
        let task = bind(Greeting, GlobalContext::new());

        let err = run(&task, "world", temp.path()).unwrap_err();

        assert!(matches!(err, Error::Render { ref template, .. } if template == "greeting.txt"));
        assert!(!temp.path().join("world.txt").exists());
    }

    #[test]
    fn test_name_comes_from_inner_task() {
        let task = bind(Greeting, GlobalContext::new());

        assert!(Task::<[String]>::name(&task).ends_with("Greeting"));
    }
}
