//! Translation port definition.

use crate::domain::AppError;

/// Port for machine translation.
pub trait Translator {
    /// Translate `text` from `source_lang` into `target_lang`.
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
    -> Result<String, AppError>;
}

/// Returns the input unchanged; used when no translation service is configured.
#[derive(Debug, Clone, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, AppError> {
        Ok(text.to_string())
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String, AppError> {
        (**self).translate(text, source_lang, target_lang)
    }
}
