use crate::domain::AppError;

pub trait GitPort {
    /// Get the current branch name.
    fn get_current_branch(&self) -> Result<String, AppError>;
}
