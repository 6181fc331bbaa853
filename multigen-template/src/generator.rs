use std::{path::Path, sync::Arc};

use multigen_core::{GenerateReport, Generator, Result};
use tracing::debug;

use crate::{GlobalContext, Renderer, TemplateFileTask, TemplateTask};

/// Default global context factory: an empty context.
pub fn create_global_context() -> GlobalContext {
    GlobalContext::default()
}

/// Generator for template based tasks.
///
/// Holds one [`GlobalContext`] for its whole lifetime. The context is either
/// supplied at construction or produced once by a factory, and every
/// registered task shares that same value.
pub struct TemplateGenerator<M: ?Sized> {
    global_context: Arc<GlobalContext>,
    renderer: Arc<dyn Renderer>,
    generator: Generator<M>,
}

impl<M: ?Sized> TemplateGenerator<M> {
    /// Create a generator using `global_context`, or an empty context when
    /// none is given.
    pub fn new(renderer: impl Renderer + 'static, global_context: Option<GlobalContext>) -> Self {
        Self::with_context_factory(renderer, global_context, create_global_context)
    }

    /// Create a generator, calling `factory` only if no `global_context` is
    /// given.
    pub fn with_context_factory(
        renderer: impl Renderer + 'static,
        global_context: Option<GlobalContext>,
        factory: impl FnOnce() -> GlobalContext,
    ) -> Self {
        let global_context = global_context.unwrap_or_else(factory);
        debug!(entries = global_context.len(), "global context ready");

        Self {
            global_context: Arc::new(global_context),
            renderer: Arc::new(renderer),
            generator: Generator::new(),
        }
    }

    /// Register a task; it renders with this generator's context and renderer.
    pub fn task<T>(mut self, task: T) -> Self
    where
        T: TemplateFileTask<M> + 'static,
    {
        let task = TemplateTask::new(
            task,
            Arc::clone(&self.global_context),
            Arc::clone(&self.renderer),
        );
        self.generator = self.generator.task(task);
        self
    }

    pub fn global_context(&self) -> &Arc<GlobalContext> {
        &self.global_context
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.generator.task_names()
    }

    pub fn len(&self) -> usize {
        self.generator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generator.is_empty()
    }

    /// See [`Generator::generate`].
    pub fn generate(&self, model: &M, outfolder: &Path) -> Result<GenerateReport> {
        self.generator.generate(model, outfolder)
    }

    /// See [`Generator::plan`].
    pub fn plan(&self, model: &M, outfolder: &Path) -> Result<GenerateReport> {
        self.generator.plan(model, outfolder)
    }
}
