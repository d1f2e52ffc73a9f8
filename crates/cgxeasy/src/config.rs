//! Profile selection and CLI flag overrides on top of `cgxeasy-config`.

use std::time::Duration;

use secrecy::SecretString;

use cgxeasy_config::{Config, Profile};
use cgxeasy_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ControllerConfig` for the active profile with flag overrides.
///
/// An explicitly requested profile must exist. Without one, the default
/// profile falls back to built-in settings so `--token` or
/// `CGX_AUTH_TOKEN` alone is enough against the public controller.
pub fn build_controller_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let fallback = Profile::default();
    let profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile,
        None if global.profile.is_some() => {
            let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        None => &fallback,
    };

    resolve_profile(profile, &profile_name, global, config)
}

/// Translate a profile + global flags into a `ControllerConfig`.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControllerConfig, CliError> {
    // flag > env > profile
    let url_str = global.controller.as_deref().unwrap_or(&profile.controller);
    let url = cgxeasy_config::controller_url(url_str)?;

    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => cgxeasy_config::resolve_token(profile, profile_name)?,
    };

    let mut controller = ControllerConfig::new(url, token);
    controller.tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        cgxeasy_config::tls_for(profile, &config.defaults)
    };
    controller.timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(config.defaults.timeout),
    );
    Ok(controller)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["cgxeasy"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["sites", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn lab_config() -> Config {
        let mut config = Config::default();
        config.profiles.insert(
            "lab".into(),
            Profile {
                controller: "https://lab.example.com".into(),
                auth_token: Some("lab-token".into()),
                timeout: Some(12),
                ..Profile::default()
            },
        );
        config
    }

    #[test]
    fn flags_override_profile() {
        let opts = global(&[
            "--profile",
            "lab",
            "--controller",
            "https://override.example.com",
            "--token",
            "flag-token",
            "--timeout",
            "5",
            "-k",
        ]);
        let controller = build_controller_config(&opts, &lab_config()).unwrap();

        assert_eq!(controller.url.as_str(), "https://override.example.com/");
        assert_eq!(controller.token.expose_secret(), "flag-token");
        assert_eq!(controller.timeout, Duration::from_secs(5));
        assert!(matches!(controller.tls, TlsVerification::DangerAcceptInvalid));
    }

    #[test]
    fn profile_timeout_applies_without_flag() {
        let opts = global(&["--profile", "lab", "--token", "t"]);
        let controller = build_controller_config(&opts, &lab_config()).unwrap();

        assert_eq!(controller.url.as_str(), "https://lab.example.com/");
        assert_eq!(controller.timeout, Duration::from_secs(12));
    }

    #[test]
    fn unknown_explicit_profile_is_rejected() {
        let opts = global(&["--profile", "prod", "--token", "t"]);
        let err = build_controller_config(&opts, &lab_config()).unwrap_err();

        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "lab");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn default_profile_falls_back_to_public_controller() {
        let opts = global(&["--token", "t"]);
        let controller = build_controller_config(&opts, &Config::default()).unwrap();

        assert_eq!(
            controller.url.as_str(),
            "https://api.elcapitan.cloudgenix.com/"
        );
    }
}
