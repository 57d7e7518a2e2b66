//! `GlobalOpts`-aware wrappers over `vatusa_config`.
//!
//! Flags win over the profile, the profile wins over built-in defaults.

use clap::ValueEnum;
use secrecy::SecretString;

use vatusa_config::{ClientSettings, Config, ConfigError, Profile};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Name of the profile selected by `--profile` or the config file.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.profile_name(global.profile.as_deref()).to_owned()
}

/// `ProfileNotFound` listing the profiles that do exist.
pub fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    available.sort_unstable();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
        path: vatusa_config::config_path().display().to_string(),
    }
}

/// Resolve the active profile. An explicitly named profile must exist;
/// the implicit default may be absent.
fn active_profile(global: &GlobalOpts, cfg: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, cfg);

    match cfg.profile(&name) {
        Ok(profile) => Ok((name, profile.clone())),
        Err(ConfigError::UnknownProfile { name }) if global.profile.is_some() => {
            Err(profile_not_found(name, cfg))
        }
        Err(ConfigError::UnknownProfile { .. }) => Ok((name, Profile::default())),
        Err(other) => Err(other.into()),
    }
}

/// The output format named by `[defaults] output` in the config file.
pub fn configured_output(cfg: &Config) -> Result<OutputFormat, CliError> {
    OutputFormat::from_str(&cfg.defaults.output, true).map_err(|reason| CliError::Validation {
        field: "defaults.output".into(),
        reason,
    })
}

/// Build `ClientSettings` from the config file, profile, and CLI overrides.
pub fn build_settings(global: &GlobalOpts, cfg: &Config) -> Result<ClientSettings, CliError> {
    let (profile_name, mut profile) = active_profile(global, cfg)?;
    tracing::debug!(profile = %profile_name, "resolving client settings");

    if let Some(ref base_url) = global.base_url {
        profile.base_url.clone_from(base_url);
    }
    if let Some(secs) = global.timeout {
        profile.timeout = Some(secs);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    let token = global.token.clone().map(SecretString::from);

    vatusa_config::profile_to_settings(&profile, &profile_name, &cfg.defaults, token)
        .map_err(CliError::from)
}
