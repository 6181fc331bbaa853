//! Generator orchestrator.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{DynTask, Result, Task};

/// Drives an ordered list of tasks over a model.
///
/// Tasks run in the order they were added; each task generates files for its
/// elements in the order its filter yields them. The first error aborts the
/// whole run, leaving files written so far on disk.
///
/// # Example
///
/// ```ignore
/// let generator = Generator::new()
///     .task(ModuleTask::new())
///     .task(PackageInitTask::new());
///
/// let report = generator.generate(&model, Path::new("out"))?;
/// ```
pub struct Generator<M: ?Sized> {
    tasks: Vec<Box<dyn DynTask<M>>>,
}

impl<M: ?Sized> Generator<M> {
    /// Create a generator without tasks.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task to run after the ones already registered.
    pub fn task(mut self, task: impl Task<M> + 'static) -> Self {
        self.tasks.push(Box::new(task));
        self
    }

    /// Add an already boxed task.
    pub fn boxed_task(mut self, task: Box<dyn DynTask<M>>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Names of the registered tasks, in execution order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.task_name())
    }

    /// Generate all files for `model` into `outfolder`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any task; remaining tasks and
    /// elements are not processed.
    pub fn generate(&self, model: &M, outfolder: &Path) -> Result<GenerateReport> {
        info!("Generating code to {:?}.", outfolder);

        let mut report = GenerateReport::default();
        for task in &self.tasks {
            debug!(task = task.task_name(), "running task");
            let files = task.generate(model, outfolder)?;
            report.push(task.task_name(), files);
        }
        Ok(report)
    }

    /// Resolve the files `generate` would write, without writing anything.
    pub fn plan(&self, model: &M, outfolder: &Path) -> Result<GenerateReport> {
        let mut report = GenerateReport::default();
        for task in &self.tasks {
            let files = task.plan(model, outfolder)?;
            report.push(task.task_name(), files);
        }
        Ok(report)
    }
}

impl<M: ?Sized> Default for Generator<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Files produced by one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFiles {
    pub task: String,
    pub files: Vec<PathBuf>,
}

/// Outcome of a generator run, grouped by task in execution order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub tasks: Vec<TaskFiles>,
}

impl GenerateReport {
    fn push(&mut self, task: &str, files: Vec<PathBuf>) {
        self.tasks.push(TaskFiles {
            task: task.to_string(),
            files,
        });
    }

    /// All paths, in generation order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.tasks
            .iter()
            .flat_map(|t| t.files.iter().map(PathBuf::as_path))
    }

    /// Total number of files.
    pub fn total(&self) -> usize {
        self.tasks.iter().map(|t| t.files.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        fs,
        path::{Path, PathBuf},
        rc::Rc,
    };

    use tempfile::TempDir;

    use super::*;
    use crate::{Error, FormatError};

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Model used by these tests: element names, each prefixed with the task it belongs to.
    type Model = Vec<String>;

    struct RecordingTask {
        name: &'static str,
        calls: CallLog,
    }

    impl Task<Model> for RecordingTask {
        type Element = String;

        fn name(&self) -> &str {
            self.name
        }

        fn filtered_elements<'a>(
            &'a self,
            model: &'a Model,
        ) -> Box<dyn Iterator<Item = &'a String> + 'a> {
            self.calls.borrow_mut().push(format!("{}.filtered_elements", self.name));
            let prefix = format!("{}:", self.name);
            Box::new(model.iter().filter(move |e| e.starts_with(&prefix)))
        }

        fn relative_path_for_element(&self, element: &String) -> Result<PathBuf> {
            Ok(PathBuf::from(element.replace(':', "_")))
        }

        fn generate_file(&self, element: &String, filepath: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("{}.run({})", self.name, element));
            self.write_formatted(element, filepath)
        }
    }

    struct FailingTask;

    impl Task<Model> for FailingTask {
        type Element = String;

        fn filtered_elements<'a>(
            &'a self,
            model: &'a Model,
        ) -> Box<dyn Iterator<Item = &'a String> + 'a> {
            Box::new(model.iter().take(1))
        }

        fn relative_path_for_element(&self, _element: &String) -> Result<PathBuf> {
            Ok(PathBuf::from("failing.txt"))
        }

        fn generate_file(&self, _element: &String, filepath: &Path) -> Result<()> {
            Err(Error::Formatting {
                path: filepath.to_path_buf(),
                source: FormatError::Malformed {
                    line: 1,
                    message: "broken".to_string(),
                },
            })
        }
    }

    fn recording(name: &'static str, calls: &CallLog) -> RecordingTask {
        RecordingTask {
            name,
            calls: Rc::clone(calls),
        }
    }

    #[test]
    fn test_generate_without_tasks() {
        let generator: Generator<Model> = Generator::new();

        let report = generator
            .generate(&vec!["x".to_string()], Path::new("does-not-matter"))
            .unwrap();

        assert_eq!(report.total(), 0);
        assert!(!Path::new("does-not-matter").exists());
    }

    #[test]
    fn test_generate_runs_tasks_in_order() {
        let temp = TempDir::new().unwrap();
        let calls = CallLog::default();
        let generator = Generator::new()
            .task(recording("task1", &calls))
            .task(recording("task2", &calls));
        let model = vec!["task1:elem1".to_string(), "task1:elem2".to_string()];

        generator.generate(&model, temp.path()).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                "task1.filtered_elements",
                "task1.run(task1:elem1)",
                "task1.run(task1:elem2)",
                "task2.filtered_elements",
            ]
        );
    }

    #[test]
    fn test_generate_report() {
        let temp = TempDir::new().unwrap();
        let calls = CallLog::default();
        let generator = Generator::new()
            .task(recording("task1", &calls))
            .task(recording("task2", &calls));
        let model = vec!["task2:b".to_string(), "task1:a".to_string()];

        let report = generator.generate(&model, temp.path()).unwrap();

        let files: Vec<_> = report.files().map(Path::to_path_buf).collect();
        assert_eq!(
            files,
            vec![temp.path().join("task1_a"), temp.path().join("task2_b")]
        );
        assert_eq!(report.tasks[0].task, "task1");
        assert_eq!(
            fs::read_to_string(temp.path().join("task2_b")).unwrap(),
            "task2:b"
        );
    }

    #[test]
    fn test_generate_aborts_on_first_error() {
        let temp = TempDir::new().unwrap();
        let calls = CallLog::default();
        let generator = Generator::new()
            .task(recording("task1", &calls))
            .task(FailingTask)
            .task(recording("task3", &calls));
        let model = vec!["task1:a".to_string(), "task3:c".to_string()];

        let err = generator.generate(&model, temp.path()).unwrap_err();

        assert!(matches!(err, Error::Formatting { .. }));
        assert!(temp.path().join("task1_a").exists());
        assert!(!temp.path().join("task3_c").exists());
        assert!(!calls.borrow().iter().any(|c| c.starts_with("task3")));
    }

    #[test]
    fn test_plan_lists_files_without_writing() {
        let temp = TempDir::new().unwrap();
        let calls = CallLog::default();
        let generator = Generator::new().task(recording("task1", &calls));
        let model = vec!["task1:a".to_string()];

        let report = generator.plan(&model, temp.path()).unwrap();

        assert_eq!(report.total(), 1);
        assert!(!temp.path().join("task1_a").exists());
        assert_eq!(*calls.borrow(), vec!["task1.filtered_elements"]);
    }

    #[test]
    fn test_task_names() {
        let calls = CallLog::default();
        let generator = Generator::new()
            .task(recording("first", &calls))
            .task(FailingTask);

        let names: Vec<_> = generator.task_names().collect();

        assert_eq!(names[0], "first");
        assert!(names[1].ends_with("FailingTask"));
        assert_eq!(generator.len(), 2);
    }
}
