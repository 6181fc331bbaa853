//! Template based generation for multigen.
//!
//! [`TemplateFileTask`]s render one template per model element. A
//! [`TemplateGenerator`] owns the [`GlobalContext`] shared by all of its tasks
//! and the [`Renderer`] they render with; each element's
//! [`TemplateContext`] merges the element, task extras and that global
//! context.

mod context;
mod generator;
mod renderer;
mod task;

pub use context::{ContextMap, ELEMENT_KEY, GlobalContext, TemplateContext};
pub use generator::{TemplateGenerator, create_global_context};
pub use renderer::{Renderer, TeraRenderer};
pub use task::{TemplateFileTask, TemplateTask};
