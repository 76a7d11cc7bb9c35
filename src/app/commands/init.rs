use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::services::scaffold_assets::scaffold_files;

/// Write the bundled config and workflow under `root`.
///
/// Existing files are left untouched unless `force` is set; the check runs
/// before anything is written, so a refused init writes nothing.
pub fn execute(root: &Path, force: bool) -> Result<Vec<PathBuf>, AppError> {
    let files = scaffold_files();

    if !force
        && let Some(existing) =
            files.iter().map(|file| root.join(&file.path)).find(|path| path.exists())
    {
        return Err(AppError::AlreadyExists(existing.display().to_string()));
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, file.content)?;
        tracing::debug!(path = %path.display(), "wrote scaffold file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::services::scaffold_assets::{CONFIG_PATH, WORKFLOW_PATH};

    #[test]
    fn writes_config_and_workflow() {
        let dir = TempDir::new().unwrap();

        let written = execute(dir.path(), false).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join(CONFIG_PATH).exists());
        assert!(dir.path().join(WORKFLOW_PATH).exists());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_PATH), "subject: mine\n").unwrap();

        let err = execute(dir.path(), false).unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(dir.path().join(CONFIG_PATH)).unwrap(), "subject: mine\n");
        assert!(!dir.path().join(WORKFLOW_PATH).exists());
    }

    #[test]
    fn force_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_PATH), "subject: mine\n").unwrap();

        execute(dir.path(), true).unwrap();

        assert!(fs::read_to_string(dir.path().join(CONFIG_PATH)).unwrap().contains("keywords:"));
    }
}
