use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::GitPort;

pub struct FakeGit {
    pub current_branch: Mutex<String>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self { current_branch: Mutex::new("main".to_string()) }
    }

    pub fn set_current_branch(&self, branch: &str) {
        *self.current_branch.lock().unwrap() = branch.to_string();
    }
}

impl GitPort for FakeGit {
    fn get_current_branch(&self) -> Result<String, AppError> {
        Ok(self.current_branch.lock().unwrap().clone())
    }
}
