//! Message delivery port definition.

use crate::domain::AppError;

/// Port for a single message destination.
pub trait Notifier {
    /// Short destination label used in logs and errors (e.g. "slack").
    fn name(&self) -> &str;

    /// Deliver one message.
    fn send(&self, text: &str) -> Result<(), AppError>;
}
