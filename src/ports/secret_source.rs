//! Secret lookup port definition.

use std::collections::BTreeMap;

/// Port for resolving named secrets at run time.
pub trait SecretSource {
    /// Value of secret `name`; unset and empty secrets both yield `None`.
    fn secret(&self, name: &str) -> Option<String>;
}

/// Fixed secrets, for tests and explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    values: BTreeMap<String, String>,
}

impl StaticSecrets {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl SecretSource for StaticSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        self.values.get(name).filter(|value| !value.is_empty()).cloned()
    }
}
