//! Standard-output notifier.

use crate::domain::AppError;
use crate::ports::Notifier;

#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    fn send(&self, text: &str) -> Result<(), AppError> {
        println!("{}", text);
        Ok(())
    }
}
