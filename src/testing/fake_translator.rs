use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::Translator;

/// Prefixes text with the target language, e.g. `[ja] text`.
#[derive(Clone, Default)]
pub struct FakeTranslator {
    pub requests: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Translator for FakeTranslator {
    fn translate(&self, text: &str, _source_lang: &str, target_lang: &str) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(AppError::http("DeepL", "quota exceeded"));
        }
        Ok(format!("[{}] {}", target_lang, text))
    }
}
