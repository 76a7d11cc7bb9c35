use std::path::PathBuf;
use std::process::Command;

use crate::domain::AppError;
use crate::ports::GitPort;

#[derive(Debug, Clone)]
pub struct GitCommandAdapter {
    root: PathBuf,
}

impl GitCommandAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new("git").args(args).current_dir(&self.root).output().map_err(
            |e| AppError::GitError { command: format!("git {}", args.join(" ")), details: e.to_string() },
        )?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::GitError {
                command: format!("git {}", args.join(" ")),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitPort for GitCommandAdapter {
    fn get_current_branch(&self) -> Result<String, AppError> {
        let branch = self.run(&["branch", "--show-current"])?;
        if branch.is_empty() {
            return Err(AppError::GitError {
                command: "git branch --show-current".to_string(),
                details: "HEAD is detached; pass the branch explicitly".to_string(),
            });
        }
        Ok(branch)
    }
}
