use crate::ports::SecretSource;

/// Reads secrets from the process environment, the way a CI runner injects them.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}
