pub mod env_secrets;
pub mod git_command;
pub mod shell_step_executor;

pub use env_secrets::EnvSecrets;
pub use git_command::GitCommandAdapter;
pub use shell_step_executor::ShellStepExecutor;
