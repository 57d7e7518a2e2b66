//! Config subcommand handlers.

use std::io::IsTerminal;

use secrecy::SecretString;
use vatusa_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("****".into());
        }
    }
    cfg
}

/// TOML-style view of the config for table output.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let Some(p) = cfg.profiles.get(name) else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if let Some(ref token) = p.token {
            let _ = writeln!(out, "token = \"{token}\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Apply one `config set` key to a profile.
fn apply_setting(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "base_url" | "base-url" => {
            vatusa_api::validate_base_url(&value).map_err(|e| CliError::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            })?;
            profile.base_url = value;
        }
        "token_env" | "token-env" => profile.token_env = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: base_url, token_env, \
                     ca_cert, insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

/// The token to store: `--token` / `VATUSA_TOKEN`, else an interactive prompt.
fn token_to_store(global: &GlobalOpts) -> Result<SecretString, CliError> {
    let token = match global.token {
        Some(ref token) => token.clone(),
        None if std::io::stdin().is_terminal() => dialoguer::Password::new()
            .with_prompt("API token")
            .interact()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
        None => {
            return Err(CliError::Validation {
                field: "token".into(),
                reason: "no token given; pass --token or set VATUSA_TOKEN".into(),
            });
        }
    };

    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(SecretString::from(token))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = redacted(&vatusa_config::load_config_or_default());
            let out = output::render_single(global.output, &cfg, format_config, |c| {
                c.profiles.keys().cloned().collect::<Vec<_>>().join("\n")
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = vatusa_config::load_config_or_default();
            let default = cfg.profile_name(None);
            if cfg.profiles.is_empty() {
                util::done(
                    "No profiles configured. Run: vatusa config set base_url <url>",
                    global.quiet,
                );
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = vatusa_config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(config::profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            vatusa_config::save_config(&cfg)?;
            util::done(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = vatusa_config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            apply_setting(profile, &key, value)?;

            vatusa_config::save_config(&cfg)?;
            util::done(&format!("Set {key} on profile '{profile_name}'"), global.quiet);
            Ok(())
        }

        ConfigCommand::SetToken => {
            let cfg = vatusa_config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let token = token_to_store(global)?;

            vatusa_config::store_token(&profile_name, &token)?;
            util::done(
                &format!("Token stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_plaintext_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "zdc".into(),
            Profile {
                token: Some("hunter2".into()),
                token_env: Some("ZDC_TOKEN".into()),
                ..Profile::default()
            },
        );

        let masked = redacted(&cfg);
        let text = format_config(&masked);
        assert!(!text.contains("hunter2"));
        assert!(text.contains("token = \"****\""));
        assert!(text.contains("token_env = \"ZDC_TOKEN\""));
        assert_eq!(cfg.profiles["zdc"].token.as_deref(), Some("hunter2"));
    }

    #[test]
    fn settings_are_parsed_per_key() {
        let mut profile = Profile::default();
        apply_setting(&mut profile, "base-url", "https://api.example/v3".into()).unwrap();
        apply_setting(&mut profile, "timeout", "12".into()).unwrap();
        apply_setting(&mut profile, "insecure", "true".into()).unwrap();

        assert_eq!(profile.base_url, "https://api.example/v3");
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn bad_settings_are_rejected() {
        let mut profile = Profile::default();
        for (key, value) in [
            ("base_url", "https://api.example/v3/"),
            ("timeout", "soon"),
            ("insecure", "maybe"),
            ("color", "red"),
        ] {
            let err = apply_setting(&mut profile, key, value.into()).unwrap_err();
            assert!(matches!(err, CliError::Validation { .. }), "{key}");
        }
        assert_eq!(profile, Profile::default());
    }
}
