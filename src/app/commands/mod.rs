pub mod init;
pub mod notify;
pub mod workflow;
