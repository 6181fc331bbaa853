//! Configuration and input for the multigen command line tool.
//!
//! - [`Manifest`] - the `multigen.toml` project manifest (template directory,
//!   global context, task list)
//! - [`Model`] - a TOML model of kinded elements that tasks select from

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod model;
mod value;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    FormatterConfig, FormatterKind, GeneratorConfig, Manifest, ManifestFile, TaskConfig,
    parse_manifest,
};
pub use model::{Element, Model};
pub use value::{table_to_json, toml_to_json};
