//! Directory creation for export destinations.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DirectoryError;

/// Paths created by [`create_new_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDirectory {
    pub root: PathBuf,
    pub sub_directories: Vec<PathBuf>,
}

/// Creates `base/name` and each `base/name/<sub>` in order.
///
/// With `intermediate` set, missing parents are created and existing
/// directories are reused; otherwise every directory must be new.
///
/// # Errors
/// [`DirectoryError::BaseNotDirectory`] when `base` is missing or a file and
/// `intermediate` is off, [`DirectoryError::Create`] for the first directory
/// that could not be created. Directories created before the failure are left
/// in place.
pub fn create_new_directory(
    name: &str,
    sub_directories: &[&str],
    base: &Path,
    intermediate: bool,
) -> Result<NewDirectory, DirectoryError> {
    if !intermediate && !base.is_dir() {
        return Err(DirectoryError::BaseNotDirectory(base.display().to_string()));
    }

    let root = base.join(name);
    make_dir(&root, intermediate)?;

    let mut created = Vec::with_capacity(sub_directories.len());
    for sub in sub_directories {
        let path = root.join(sub);
        make_dir(&path, intermediate)?;
        created.push(path);
    }

    tracing::debug!(root = %root.display(), subs = created.len(), "created directory tree");
    Ok(NewDirectory {
        root,
        sub_directories: created,
    })
}

fn make_dir(path: &Path, intermediate: bool) -> Result<(), DirectoryError> {
    let result = if intermediate {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };

    result.map_err(|source| DirectoryError::Create {
        path: path.display().to_string(),
        source,
    })
}
