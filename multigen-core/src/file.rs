use std::path::Path;

use crate::{Error, Result};

/// Create the parent directory tree of `filepath` if it does not exist yet.
///
/// Calling this repeatedly is fine: an existing directory (including one created
/// concurrently by another process) is not an error. Paths without a parent
/// component resolve against the working directory and need nothing created.
pub fn ensure_folder(filepath: &Path) -> Result<()> {
    let Some(parent) = filepath.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

/// Write the whole file, replacing any previous content.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
