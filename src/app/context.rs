use crate::ports::{Notifier, PaperSource, Translator};

/// Application context holding the notifier pipeline's dependencies.
pub struct AppContext<P: PaperSource, T: Translator> {
    papers: P,
    translator: T,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl<P: PaperSource, T: Translator> AppContext<P, T> {
    pub fn new(papers: P, translator: T, notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { papers, translator, notifiers }
    }

    pub fn papers(&self) -> &P {
        &self.papers
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// Destinations every rendered message is delivered to.
    pub fn notifiers(&self) -> &[Box<dyn Notifier>] {
        &self.notifiers
    }
}
