//! Configuration loading.
//!
//! Config is resolved with this precedence (highest first):
//! 1. `LYRA_*` environment variables
//! 2. Explicit `--config <path>`
//! 3. Local `./lyra.toml`
//! 4. Global `$XDG_CONFIG_HOME/lyra/lyra.toml` (or `~/.config/lyra/lyra.toml`)
//! 5. Built-in defaults
//!
//! The global file is never created implicitly; `lyra init` writes it.

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use init::{config_root_dir, default_global_config_path, initialize_default_global_config};
pub use loader::load_config;
pub use types::{
    AccountConfig, Config, DisplayConfig, GlobalConfigInitResult, PortalConfig, StorageConfig,
    ThemeConfig, ToastConfig,
};

#[cfg(test)]
mod tests {
    use super::defaults::DEFAULT_LYRA_CONFIG_TEMPLATE;
    use super::init::initialize_default_global_config_at_path;
    use super::loader::load_config_from_sources;
    use super::*;
    use crate::error::ConfigError;
    use crate::testsupport::TestTempDir;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.account.user_id, None);
        assert!(!config.account.admin);
        assert_eq!(config.theme.min_overlay_ms, 2000);
        assert_eq!(config.toast.ttl_ms, 3000);
        assert_eq!(config.portal.token_length, 12);
        assert!(config.display.color);
    }

    #[test]
    fn embedded_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_LYRA_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.theme.min_overlay_ms, 2000);
        assert_eq!(config.toast.ttl_ms, 3000);
        assert_eq!(config.portal.base, "/");
        assert!(!config.account.admin);
    }

    #[test]
    fn parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [account]
            user_id = "u-1"

            [toast]
            ttl_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.account.user_id.as_deref(), Some("u-1"));
        assert_eq!(config.toast.ttl_ms, 1500);
        assert_eq!(config.theme.min_overlay_ms, 2000);
    }

    #[test]
    fn storage_paths_fall_back_when_blank() {
        let storage = StorageConfig {
            settings_path: Some("  ".to_string()),
            theme_cache_path: Some("/tmp/lyra/theme".to_string()),
        };
        assert!(storage
            .resolved_settings_path()
            .ends_with("user_settings.toml"));
        assert_eq!(
            storage.resolved_theme_cache_path(),
            PathBuf::from("/tmp/lyra/theme")
        );
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_with_sources_for_test(
            Some("/missing/lyra.toml"),
            BTreeMap::new(),
            BTreeMap::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn injected_sources_prefer_local_lyra_toml_over_global() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "lyra.toml".to_string(),
            "[account]\nuser_id = \"local\"\n".to_string(),
        );
        files.insert(
            "/cfg/lyra/lyra.toml".to_string(),
            "[account]\nuser_id = \"global\"\nadmin = true\n".to_string(),
        );

        let config = load_config_with_sources_for_test(
            None,
            files,
            BTreeMap::new(),
            Some(PathBuf::from("/cfg")),
        )
        .unwrap();

        assert_eq!(config.account.user_id.as_deref(), Some("local"));
        assert!(!config.account.admin);
    }

    #[test]
    fn injected_sources_read_global_when_no_local_file() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "/cfg/lyra/lyra.toml".to_string(),
            "[theme]\nmin_overlay_ms = 10\n".to_string(),
        );
        let config =
            load_config_with_sources_for_test(None, files, BTreeMap::new(), Some("/cfg".into()))
                .unwrap();
        assert_eq!(config.theme.min_overlay_ms, 10);
    }

    #[test]
    fn injected_sources_apply_env_overrides() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "lyra.toml".to_string(),
            "[account]\nuser_id = \"file-user\"\n".to_string(),
        );
        let mut env = BTreeMap::<String, String>::new();
        env.insert("LYRA_USER_ID".to_string(), "env-user".to_string());
        env.insert("LYRA_ADMIN".to_string(), "yes".to_string());
        env.insert("LYRA_TOAST_TTL_MS".to_string(), "0".to_string());
        env.insert("LYRA_MIN_OVERLAY_MS".to_string(), "250".to_string());
        env.insert(
            "LYRA_SETTINGS_PATH".to_string(),
            "/data/settings.toml".to_string(),
        );

        let config =
            load_config_with_sources_for_test(None, files, env, Some(PathBuf::from("/cfg")))
                .unwrap();

        assert_eq!(config.account.user_id.as_deref(), Some("env-user"));
        assert!(config.account.admin);
        assert_eq!(config.toast.ttl_ms, 1);
        assert_eq!(config.theme.min_overlay_ms, 250);
        assert_eq!(
            config.storage.resolved_settings_path(),
            PathBuf::from("/data/settings.toml")
        );
    }

    #[test]
    fn blank_env_user_signs_out() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert(
            "lyra.toml".to_string(),
            "[account]\nuser_id = \"file-user\"\n".to_string(),
        );
        let mut env = BTreeMap::<String, String>::new();
        env.insert("LYRA_USER_ID".to_string(), "  ".to_string());
        let config = load_config_with_sources_for_test(None, files, env, None).unwrap();
        assert_eq!(config.account.user_id, None);
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        let mut env = BTreeMap::<String, String>::new();
        env.insert("LYRA_MIN_OVERLAY_MS".to_string(), "soon".to_string());
        let err = load_config_with_sources_for_test(None, BTreeMap::new(), env, None).unwrap_err();
        assert!(err.to_string().contains("LYRA_MIN_OVERLAY_MS"));

        let mut env = BTreeMap::<String, String>::new();
        env.insert("LYRA_ADMIN".to_string(), "maybe".to_string());
        let err = load_config_with_sources_for_test(None, BTreeMap::new(), env, None).unwrap_err();
        assert!(err.to_string().contains("LYRA_ADMIN"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut files = BTreeMap::<String, String>::new();
        files.insert("lyra.toml".to_string(), "[account\n".to_string());
        let err = load_config_with_sources_for_test(None, files, BTreeMap::new(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn initialize_global_config_writes_template() {
        let tmp = TestTempDir::new("config-init");
        let path = tmp.path().join("lyra").join("lyra.toml");

        let outcome = initialize_default_global_config_at_path(&path, false).unwrap();
        assert_eq!(outcome, GlobalConfigInitResult::Created { path: path.clone() });
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_LYRA_CONFIG_TEMPLATE);
    }

    #[test]
    fn initialize_global_config_returns_already_initialized_without_force() {
        let tmp = TestTempDir::new("config-init-existing");
        let path = tmp.path().join("lyra").join("lyra.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old-config").unwrap();

        let outcome = initialize_default_global_config_at_path(&path, false).unwrap();
        assert!(matches!(
            outcome,
            GlobalConfigInitResult::AlreadyInitialized { path: ref p } if p == &path
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old-config");
    }

    #[test]
    fn initialize_global_config_force_overwrites_and_creates_backup() {
        let tmp = TestTempDir::new("config-init-force");
        let path = tmp.path().join("lyra").join("lyra.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old-config").unwrap();

        let outcome = initialize_default_global_config_at_path(&path, true).unwrap();
        let backup_path = match outcome {
            GlobalConfigInitResult::Overwritten {
                path: returned_path,
                backup_path,
            } => {
                assert_eq!(returned_path, path);
                backup_path
            }
            other => panic!("unexpected outcome: {other:?}"),
        };

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            DEFAULT_LYRA_CONFIG_TEMPLATE
        );
        assert_eq!(std::fs::read_to_string(&backup_path).unwrap(), "old-config");
        assert_eq!(backup_path.parent(), path.parent());
        assert!(backup_path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(".bak")));
    }

    fn load_config_with_sources_for_test(
        path_override: Option<&str>,
        files: BTreeMap<String, String>,
        env: BTreeMap<String, String>,
        config_root: Option<PathBuf>,
    ) -> Result<Config, ConfigError> {
        load_config_from_sources(
            path_override,
            move |path| {
                let key = path.to_string_lossy().into_owned();
                files
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, key))
            },
            move |name| env.get(name).cloned(),
            move || config_root.clone(),
        )
    }
}
