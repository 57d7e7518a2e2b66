//! Shared configuration for VATUSA API tools.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! translation to the facade's construction parameters. The library crate
//! never touches files or the environment; hosts go through this crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vatusa_api::{TlsMode, TransportConfig, VatusaClient};

/// Base address used when neither a profile nor a flag names one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const KEYRING_SERVICE: &str = "vatusa";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`,
    /// else `"default"`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named API profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root, without a trailing slash (e.g. "https://api.vatusa.net/v3").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Path to an extra CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid certificates.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `VATUSA_CONFIG` if set, else the
/// XDG / platform location.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("VATUSA_CONFIG") {
        return PathBuf::from(path);
    }
    ProjectDirs::from("net", "vatusa", "vatusa").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vatusa");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// `VATUSA_`-prefixed variables override file values; `__` separates
/// nesting levels (`VATUSA_DEFAULTS__TIMEOUT=5`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VATUSA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token from the credential chain (no CLI flag step).
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring for the given profile.
pub fn store_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")).map_err(
        |e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        },
    )?;
    entry
        .set_password(token.expose_secret())
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Client settings ─────────────────────────────────────────────────

/// Everything needed to build a `VatusaClient`.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub token: SecretString,
    pub transport: TransportConfig,
}

impl ClientSettings {
    pub fn connect(&self) -> Result<VatusaClient, vatusa_api::Error> {
        VatusaClient::with_config(
            self.token.expose_secret().to_owned(),
            &self.base_url,
            &self.transport,
        )
    }
}

/// TLS and timeout settings for a profile.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        ..TransportConfig::default()
    }
}

/// Build `ClientSettings` from a profile. An explicit `token` skips the
/// credential chain.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    token: Option<SecretString>,
) -> Result<ClientSettings, ConfigError> {
    validate_base_url(&profile.base_url)?;
    let token = match token {
        Some(token) => token,
        None => resolve_token(profile, profile_name)?,
    };

    Ok(ClientSettings {
        base_url: profile.base_url.clone(),
        token,
        transport: profile_transport(profile, defaults),
    })
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    vatusa_api::validate_base_url(base_url).map_err(|e| ConfigError::Validation {
        field: "base_url".into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;

    const SAMPLE: &str = r#"
default_profile = "zdc"

[defaults]
output = "json"

[profiles.zdc]
base_url = "https://api.vatusa.net/v3"
token_env = "ZDC_TOKEN"
timeout = 10

[profiles.local]
token = "plain"
"#;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("absent.toml");
            let cfg = load_config_from(&path).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_are_loaded() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;

            assert_eq!(cfg.profile_name(None), "zdc");
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.timeout, 30);
            let zdc = cfg.profile("zdc").map_err(|e| e.to_string())?;
            assert_eq!(zdc.base_url, "https://api.vatusa.net/v3");
            assert_eq!(zdc.timeout, Some(10));
            let local = cfg.profile("local").map_err(|e| e.to_string())?;
            assert_eq!(local.base_url, DEFAULT_BASE_URL);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("VATUSA_DEFAULTS__TIMEOUT", "5");
            jail.set_env("VATUSA_DEFAULT_PROFILE", "local");
            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;

            assert_eq!(cfg.defaults.timeout, 5);
            assert_eq!(cfg.profile_name(None), "local");
            assert_eq!(cfg.profile_name(Some("zdc")), "zdc");
            Ok(())
        });
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                token: Some("t".into()),
                ..Profile::default()
            },
        );

        save_config_to(&path, &cfg).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[profiles.default]"));

        Jail::expect_with(|_| {
            let loaded = load_config_from(&path).map_err(|e| e.to_string())?;
            assert_eq!(loaded.profiles, cfg.profiles);
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = Config::default().profile("nope").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref name } if name == "nope"));
    }

    #[test]
    fn token_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("VATUSA_TEST_TOKEN_ENV", "from-env");
            let profile = Profile {
                token: Some("plain".into()),
                token_env: Some("VATUSA_TEST_TOKEN_ENV".into()),
                ..Profile::default()
            };
            let token = resolve_token(&profile, "token-env-test").map_err(|e| e.to_string())?;
            assert_eq!(token.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn plaintext_token_is_last_resort() {
        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("VATUSA_TEST_UNSET_VARIABLE".into()),
            ..Profile::default()
        };
        let token = resolve_token(&profile, "vatusa-config-plaintext-test").unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn no_token_anywhere() {
        let err = resolve_token(&Profile::default(), "vatusa-config-empty-test").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn settings_carry_transport_overrides() {
        let profile = Profile {
            base_url: "https://api.example/v3".into(),
            token: Some("t".into()),
            insecure: Some(true),
            timeout: Some(7),
            ..Profile::default()
        };
        let settings = profile_to_settings(
            &profile,
            "vatusa-config-settings-test",
            &Defaults::default(),
            None,
        )
        .unwrap();

        assert_eq!(settings.base_url, "https://api.example/v3");
        assert_eq!(settings.transport.timeout, Duration::from_secs(7));
        assert!(matches!(settings.transport.tls, TlsMode::DangerAcceptInvalid));
        assert!(settings.connect().is_ok());
    }

    #[test]
    fn trailing_slash_base_url_is_rejected() {
        let profile = Profile {
            base_url: "https://api.example/v3/".into(),
            token: Some("t".into()),
            ..Profile::default()
        };
        let err = profile_to_settings(&profile, "x", &Defaults::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn base_url_rule_matches_the_client() {
        for bad in ["https://api.example/v3/", "not a url"] {
            let profile = Profile {
                base_url: bad.into(),
                token: Some("t".into()),
                ..Profile::default()
            };
            let err = profile_to_settings(&profile, "x", &Defaults::default(), None).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }), "{bad}");
            assert!(matches!(
                vatusa_api::validate_base_url(bad),
                Err(vatusa_api::Error::InvalidBaseAddress { .. })
            ));
        }
    }

    #[test]
    fn explicit_token_skips_the_chain() {
        let settings = profile_to_settings(
            &Profile::default(),
            "vatusa-config-explicit-token-test",
            &Defaults::default(),
            Some(SecretString::from("from-flag")),
        )
        .unwrap();
        assert_eq!(settings.token.expose_secret(), "from-flag");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_path_honours_override() {
        Jail::expect_with(|jail| {
            jail.set_env("VATUSA_CONFIG", "/tmp/elsewhere/vatusa.toml");
            assert_eq!(config_path(), PathBuf::from("/tmp/elsewhere/vatusa.toml"));
            Ok(())
        });
    }

    #[test]
    fn store_token_writes_keyring_entry() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        store_token(
            "vatusa-config-store-test",
            &SecretString::from("stored-secret"),
        )
        .unwrap();
    }

    #[test]
    fn default_timeout_applies_without_override() {
        let transport = profile_transport(&Profile::default(), &Defaults::default());
        assert_eq!(transport.timeout, Duration::from_secs(30));
        assert!(matches!(transport.tls, TlsMode::System));
    }
}
