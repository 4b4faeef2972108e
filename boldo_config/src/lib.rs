use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use boldo_models::{email_address::EmailAddressWithName, Sensitive};
use config::{File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of additional config
/// files. Later files override earlier ones.
pub const CONFIG_PATHS_ENV: &str = "BOLDO_CONFIG";

/// Environment variable overriding `email.resend.api_key`.
pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";

const RESEND_API_KEY_PATH: &str = "email.resend.api_key";

/// Load the default config, the files listed in [`CONFIG_PATHS_ENV`] and
/// the secrets passed via environment variables.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|p| !p.is_empty()))
        .map(Path::new)
        .collect::<Vec<_>>();

    let api_key = std::env::var(RESEND_API_KEY_ENV).ok();

    load_with_api_key(&paths, &[] as &[&str], api_key.as_deref())
}

/// Load the given config files, followed by TOML snippets that override
/// individual keys.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[impl AsRef<str>],
) -> anyhow::Result<Config> {
    load_with_api_key(paths, overrides, None)
}

fn load_with_api_key(
    paths: &[impl AsRef<Path>],
    overrides: &[impl AsRef<str>],
    api_key: Option<&str>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, snippet| {
            builder.add_source(File::from_str(snippet.as_ref(), FileFormat::Toml))
        })
        .set_override_option(RESEND_API_KEY_PATH, api_key)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub from: EmailAddressWithName,
    pub resend: Option<ResendConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Resend,
    Smtp,
}

#[derive(Debug, Deserialize)]
pub struct ResendConfig {
    pub api_url: Url,
    pub api_key: Sensitive<String>,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: Sensitive<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
    pub provider_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub reset_delay: Duration,
}
