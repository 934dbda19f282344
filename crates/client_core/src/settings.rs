use std::{env, fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use shared::domain::MinistryId;
use tracing::warn;

pub const SETTINGS_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub church_api_url: String,
    pub api_token: Option<String>,
    pub ministry_id: Option<MinistryId>,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            church_api_url: "https://sistema.igrejared.com/api-church".into(),
            api_token: None,
            ministry_id: None,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("no api token configured"))
            .context("set JWT_TOKEN, APP__API_TOKEN or api_token in roster.toml")
    }

    pub fn require_ministry(&self) -> anyhow::Result<MinistryId> {
        self.ministry_id
            .ok_or_else(|| anyhow!("no ministry id configured"))
            .context("set MINISTRY_ID, APP__MINISTRY_ID or ministry_id in roster.toml")
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    church_api_url: Option<String>,
    api_token: Option<String>,
    ministry_id: Option<i64>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| env::var(key).ok())
}

/// Defaults, then the optional settings file, then environment overrides.
/// Later `APP__*` names win over the short ones.
pub fn load_settings_from<F>(path: &Path, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.church_api_url {
                    settings.church_api_url = v;
                }
                if let Some(v) = file_cfg.api_token {
                    settings.api_token = Some(v);
                }
                if let Some(v) = file_cfg.ministry_id {
                    settings.ministry_id = Some(MinistryId(v));
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    for key in ["API_CHURCH_URL", "APP__CHURCH_API_URL"] {
        if let Some(v) = lookup(key) {
            settings.church_api_url = v;
        }
    }
    for key in ["JWT_TOKEN", "APP__API_TOKEN"] {
        if let Some(v) = lookup(key) {
            settings.api_token = Some(v);
        }
    }
    for key in ["MINISTRY_ID", "APP__MINISTRY_ID"] {
        if let Some(v) = lookup(key) {
            match v.trim().parse::<i64>() {
                Ok(id) => settings.ministry_id = Some(MinistryId(id)),
                Err(_) => warn!(key, value = %v, "ignoring non-numeric ministry id"),
            }
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
