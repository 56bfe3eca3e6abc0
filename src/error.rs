//! Unified error types for the account layer.

use std::fmt;

use crate::account::AccountTab;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from the settings persistence backend.
///
/// `Display` is the human-readable text surfaced in error toasts, so backend
/// rejections render their message verbatim.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Decode(toml::de::Error),
    Encode(toml::ser::Error),
    /// The backend refused the write (conflict, auth, validation).
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings store io: {e}"),
            Self::Decode(e) => write!(f, "settings store is corrupt: {e}"),
            Self::Encode(e) => write!(f, "failed to encode settings: {e}"),
            Self::Rejected(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        Self::Decode(e)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// AccountError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type for account page operations.
#[derive(Debug)]
pub enum AccountError {
    Config(ConfigError),
    Store(StoreError),
    /// The requested tab requires the authorization flag.
    TabNotAllowed(AccountTab),
    UnknownTab(String),
    UnknownTheme(String),
    NotSignedIn,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::TabNotAllowed(tab) => write!(f, "tab `{}` requires admin access", tab.as_str()),
            Self::UnknownTab(name) => write!(
                f,
                "unknown tab `{name}`. Available tabs: profile, look_and_feel, admin, support"
            ),
            Self::UnknownTheme(name) => write!(f, "unknown city theme `{name}`"),
            Self::NotSignedIn => write!(f, "Not signed in"),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<ConfigError> for AccountError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn store_rejection_renders_backend_message_verbatim() {
        let e = StoreError::Rejected("duplicate key value violates unique constraint".into());
        assert_eq!(
            e.to_string(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn account_error_wraps_store_message_without_prefix() {
        let ae = AccountError::from(StoreError::Rejected("JWT expired".into()));
        assert_eq!(ae.to_string(), "JWT expired");
    }

    #[test]
    fn account_error_display_variants() {
        assert_eq!(
            AccountError::TabNotAllowed(AccountTab::Admin).to_string(),
            "tab `admin` requires admin access"
        );
        assert_eq!(AccountError::NotSignedIn.to_string(), "Not signed in");
        assert!(AccountError::UnknownTheme("paris".into())
            .to_string()
            .contains("paris"));
    }
}
