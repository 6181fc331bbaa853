//! Generation tasks.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    Error, Result,
    file::{ensure_folder, write_file},
    formatter::{Formatter, RawFormatter},
};

/// File generation task applied to a set of model elements.
///
/// A task answers three questions for one category of generated artifact:
/// which elements it applies to, where the file for an element goes, and
/// what the file contains. The provided [`Task::run`] ties them together and
/// is not meant to be overridden.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
///
/// use multigen_core::{Result, Task};
///
/// struct Notes;
///
/// impl Task<Vec<String>> for Notes {
///     type Element = String;
///
///     fn filtered_elements<'a>(
///         &'a self,
///         model: &'a Vec<String>,
///     ) -> Box<dyn Iterator<Item = &'a String> + 'a> {
///         Box::new(model.iter().filter(|n| !n.is_empty()))
///     }
///
///     fn relative_path_for_element(&self, element: &String) -> Result<PathBuf> {
///         Ok(PathBuf::from(format!("{element}.txt")))
///     }
///
///     fn generate_file(&self, element: &String, filepath: &Path) -> Result<()> {
///         self.write_formatted(element, filepath)
///     }
/// }
/// ```
pub trait Task<M: ?Sized> {
    /// Model element type this task generates files for.
    type Element: fmt::Debug + ?Sized;

    /// Name used in logs and reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Elements of `model` to execute this task for, in generation order.
    fn filtered_elements<'a>(
        &'a self,
        model: &'a M,
    ) -> Box<dyn Iterator<Item = &'a Self::Element> + 'a>;

    /// File path receiving the output for `element`.
    ///
    /// Relative paths are resolved against the output folder; absolute paths
    /// are used as they are. Must not depend on anything but the task
    /// configuration and the element.
    fn relative_path_for_element(&self, element: &Self::Element) -> Result<PathBuf>;

    /// Produce the file content for `element` and write it to `filepath`.
    ///
    /// The parent directory of `filepath` exists when this is called.
    /// Implementations normally finish with [`Task::write_formatted`].
    fn generate_file(&self, element: &Self::Element, filepath: &Path) -> Result<()>;

    /// Formatter applied to raw content before it is written.
    fn formatter(&self) -> &dyn Formatter {
        &RawFormatter
    }

    /// Resolve the output path of `element` against `outfolder`.
    ///
    /// An empty `outfolder` leaves the path untouched, and so does an absolute
    /// path returned by [`Task::relative_path_for_element`]: the output folder
    /// is ignored for that element.
    fn resolve_path(&self, element: &Self::Element, outfolder: &Path) -> Result<PathBuf> {
        let filepath = self.relative_path_for_element(element)?;
        if outfolder.as_os_str().is_empty() || filepath.is_absolute() {
            Ok(filepath)
        } else {
            Ok(outfolder.join(filepath))
        }
    }

    /// Apply this task to a single element, returning the written path.
    fn run(&self, element: &Self::Element, outfolder: &Path) -> Result<PathBuf> {
        let filepath = self.resolve_path(element, outfolder)?;
        debug!(task = self.name(), "{:?} --> {}", element, filepath.display());

        ensure_folder(&filepath)?;
        self.generate_file(element, &filepath)?;
        Ok(filepath)
    }

    /// Format `raw` with this task's formatter and write the result.
    ///
    /// Nothing is written if the formatter rejects the content.
    fn write_formatted(&self, raw: &str, filepath: &Path) -> Result<()> {
        let formatter = self.formatter();
        trace!(formatter = formatter.name(), path = %filepath.display(), "formatting");

        let formatted = formatter
            .format(raw)
            .map_err(|source| Error::Formatting {
                path: filepath.to_path_buf(),
                source,
            })?;
        write_file(filepath, &formatted)
    }
}

/// Object-safe view of a [`Task`], letting one generator own tasks with
/// different element types.
pub trait DynTask<M: ?Sized> {
    fn task_name(&self) -> &str;

    /// Filter the model and run the task for every element, in order.
    fn generate(&self, model: &M, outfolder: &Path) -> Result<Vec<PathBuf>>;

    /// Filter the model and resolve every output path without touching the
    /// filesystem.
    fn plan(&self, model: &M, outfolder: &Path) -> Result<Vec<PathBuf>>;
}

impl<M: ?Sized, T: Task<M>> DynTask<M> for T {
    fn task_name(&self) -> &str {
        self.name()
    }

    fn generate(&self, model: &M, outfolder: &Path) -> Result<Vec<PathBuf>> {
        self.filtered_elements(model)
            .map(|element| self.run(element, outfolder))
            .collect()
    }

    fn plan(&self, model: &M, outfolder: &Path) -> Result<Vec<PathBuf>> {
        self.filtered_elements(model)
            .map(|element| self.resolve_path(element, outfolder))
            .collect()
    }
}
