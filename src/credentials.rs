//! API key selection and storage
//!
//! The Gemini key can come from the environment, the config file, or the
//! system keyring. Providers read it through a shared [`ApiKey`] handle on
//! every request, so re-selecting a key takes effect without rebuilding
//! any client.

use crate::config::GeminiConfig;
use crate::error::Result;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Environment variables consulted for the key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const KEYRING_SERVICE: &str = "novastream";
const KEYRING_USER: &str = "gemini_api_key";

/// Shared, swappable API key
#[derive(Clone, Default)]
pub struct ApiKey {
    inner: Arc<RwLock<Option<String>>>,
}

impl ApiKey {
    /// Create a handle holding `key`
    pub fn new(key: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(key.filter(|k| !k.trim().is_empty()))),
        }
    }

    /// Current key, if one is selected
    pub fn get(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// Replace the key for every clone of this handle
    pub fn set(&self, key: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(key.into());
        }
    }

    /// Forget the key
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }

    /// True when a key is present
    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_set() { "<set>" } else { "<unset>" };
        f.debug_tuple("ApiKey").field(&state).finish()
    }
}

/// Where a resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Named environment variable
    Environment(&'static str),
    /// `gemini.api_key` in the config file
    ConfigFile,
    /// System keyring
    Keyring,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment(var) => write!(f, "environment variable {}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Keyring => write!(f, "system keyring"),
        }
    }
}

/// System keyring entry holding the selected key
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    user: String,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_USER)
    }
}

impl CredentialStore {
    /// Create a store for a specific keyring service and user
    pub fn new(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    /// Load the stored key, `None` when absent or blank
    pub fn load(&self) -> Result<Option<String>> {
        let entry = keyring::Entry::new(&self.service, &self.user)?;
        match entry.get_password() {
            Ok(key) if key.trim().is_empty() => Ok(None),
            Ok(key) => Ok(Some(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a key
    pub fn save(&self, key: &str) -> Result<()> {
        let entry = keyring::Entry::new(&self.service, &self.user)?;
        entry.set_password(key)?;
        tracing::info!("Stored API key in system keyring");
        Ok(())
    }

    /// Remove the stored key (best-effort)
    pub fn clear(&self) -> Result<()> {
        let entry = keyring::Entry::new(&self.service, &self.user)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                tracing::warn!("Failed to clear stored API key: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Find a key from the environment or the config file
///
/// Environment variables win over the config file.
pub fn resolve_without_keyring(config: &GeminiConfig) -> Option<(String, KeySource)> {
    for var in API_KEY_ENV_VARS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Some((value, KeySource::Environment(var)));
            }
        }
    }

    config
        .api_key
        .as_ref()
        .filter(|k| !k.trim().is_empty())
        .map(|k| (k.clone(), KeySource::ConfigFile))
}

/// Find a key from the environment, the config file, then the keyring
///
/// Keyring failures are logged and treated as "no key".
pub fn resolve_api_key(
    config: &GeminiConfig,
    store: &CredentialStore,
) -> Option<(String, KeySource)> {
    if let Some(found) = resolve_without_keyring(config) {
        return Some(found);
    }

    match store.load() {
        Ok(Some(key)) => Some((key, KeySource::Keyring)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Keyring not available: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in API_KEY_ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_api_key_shared_between_clones() {
        let key = ApiKey::new(None);
        let clone = key.clone();
        assert!(!clone.is_set());

        key.set("abc");
        assert_eq!(clone.get().as_deref(), Some("abc"));

        clone.clear();
        assert!(!key.is_set());
    }

    #[test]
    fn test_api_key_blank_is_unset() {
        assert!(!ApiKey::new(Some("   ".to_string())).is_set());
    }

    #[test]
    fn test_api_key_debug_hides_value() {
        let key = ApiKey::new(Some("secret".to_string()));
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<set>"));
    }

    #[test]
    #[serial]
    fn test_resolve_prefers_environment() {
        clear_env();
        std::env::set_var("API_KEY", "from-api-key");
        std::env::set_var("GEMINI_API_KEY", "from-gemini");

        let config = GeminiConfig {
            api_key: Some("from-config".to_string()),
            ..GeminiConfig::default()
        };
        let (key, source) = resolve_without_keyring(&config).unwrap();
        assert_eq!(key, "from-gemini");
        assert_eq!(source, KeySource::Environment("GEMINI_API_KEY"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_resolve_falls_back_to_config() {
        clear_env();
        let config = GeminiConfig {
            api_key: Some("from-config".to_string()),
            ..GeminiConfig::default()
        };
        let (key, source) = resolve_without_keyring(&config).unwrap();
        assert_eq!(key, "from-config");
        assert_eq!(source, KeySource::ConfigFile);

        assert!(resolve_without_keyring(&GeminiConfig::default()).is_none());
    }

    #[test]
    fn test_key_source_display() {
        assert_eq!(
            KeySource::Environment("GEMINI_API_KEY").to_string(),
            "environment variable GEMINI_API_KEY"
        );
        assert_eq!(KeySource::Keyring.to_string(), "system keyring");
    }
}
