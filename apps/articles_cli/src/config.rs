use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use client_core::{DEFAULT_BASE_URL, TOKEN_KEY};

pub const DEFAULT_CONFIG_FILE: &str = "articles.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            data_dir: default_data_dir(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_KEY)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("articles_client"))
        .unwrap_or_else(|| PathBuf::from(".articles_client"))
}

/// Defaults, then the config file, then environment variables.
///
/// An explicitly requested config file must exist; the default
/// `articles.toml` in the working directory is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: toml::Table = toml::from_str(raw)?;

    if let Some(v) = file_cfg.get("base_url") {
        settings.base_url = v
            .as_str()
            .ok_or_else(|| anyhow!("base_url must be a string"))?
            .to_string();
    }
    if let Some(v) = file_cfg.get("data_dir") {
        settings.data_dir = v
            .as_str()
            .ok_or_else(|| anyhow!("data_dir must be a string"))?
            .into();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        let secs = v
            .as_integer()
            .ok_or_else(|| anyhow!("request_timeout_secs must be an integer"))?;
        settings.request_timeout_secs =
            u64::try_from(secs).context("request_timeout_secs must not be negative")?;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("ARTICLES_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = lookup("ARTICLES_DATA_DIR") {
        settings.data_dir = v.into();
    }
    if let Some(v) = lookup("APP__DATA_DIR") {
        settings.data_dir = v.into();
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
