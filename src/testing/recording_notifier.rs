use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::Notifier;

/// Records delivered messages; clones share the same log.
#[derive(Clone)]
pub struct RecordingNotifier {
    pub name: String,
    pub messages: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), messages: Arc::new(Mutex::new(vec![])), fail: false }
    }

    pub fn failing(name: &str) -> Self {
        Self { fail: true, ..Self::new(name) }
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, text: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::http(&self.name, "HTTP 500"));
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
