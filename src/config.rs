use std::path::PathBuf;

use config::Config;
use serde::Deserialize;

use crate::error::MonitorError;

pub const DEFAULT_CASE_URL: &str =
    "https://icsid.worldbank.org/cases/case-database/case-detail?CaseNo=ARB/23/39";
const DEFAULT_STATE_PATH: &str = "data/snapshot.json";
const DEFAULT_COMMAND_WINDOW_SECS: i64 = 180;

/// Runtime settings, read from `ICSID_*` environment variables. Everything
/// has a default except the channel credentials, which only the monitoring
/// run requires.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub telegram_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default = "default_case_url")]
    pub case_url: String,
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    #[serde(default = "default_command_window_secs")]
    pub command_window_secs: i64,
}

/// The credentials a monitoring run cannot start without.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub token: String,
    pub chat_id: String,
}

impl Settings {
    pub fn load() -> Result<Self, MonitorError> {
        let cfg = Config::builder()
            .add_source(config::Environment::with_prefix("ICSID"))
            .build()
            .map_err(|e| MonitorError::Configuration(e.to_string()))?;
        cfg.try_deserialize()
            .map_err(|e| MonitorError::Configuration(e.to_string()))
    }

    /// Require the channel credentials, naming every missing variable in
    /// one error so a misconfigured deployment is fixed in one edit.
    pub fn channel(&self) -> Result<ChannelConfig, MonitorError> {
        let token = self.telegram_token.clone().filter(|t| !t.is_empty());
        let chat_id = self.chat_id.clone().filter(|c| !c.is_empty());
        match (token, chat_id) {
            (Some(token), Some(chat_id)) => Ok(ChannelConfig { token, chat_id }),
            (token, chat_id) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push("ICSID_TELEGRAM_TOKEN");
                }
                if chat_id.is_none() {
                    missing.push("ICSID_CHAT_ID");
                }
                Err(MonitorError::Configuration(format!(
                    "missing required settings: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    pub fn command_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.command_window_secs)
    }
}

fn default_case_url() -> String {
    DEFAULT_CASE_URL.to_string()
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_PATH)
}

fn default_command_window_secs() -> i64 {
    DEFAULT_COMMAND_WINDOW_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: Option<&str>, chat_id: Option<&str>) -> Settings {
        Settings {
            telegram_token: token.map(str::to_string),
            chat_id: chat_id.map(str::to_string),
            case_url: default_case_url(),
            state_path: default_state_path(),
            command_window_secs: default_command_window_secs(),
        }
    }

    #[test]
    fn channel_succeeds_with_both_credentials() {
        let cfg = settings(Some("123:abc"), Some("-100200300")).channel().unwrap();
        assert_eq!(cfg.token, "123:abc");
        assert_eq!(cfg.chat_id, "-100200300");
    }

    #[test]
    fn channel_error_names_every_missing_variable() {
        let err = settings(None, None).channel().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ICSID_TELEGRAM_TOKEN"));
        assert!(message.contains("ICSID_CHAT_ID"));
    }

    #[test]
    fn empty_credential_counts_as_missing() {
        let err = settings(Some(""), Some("-1")).channel().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("ICSID_TELEGRAM_TOKEN"));
        assert!(!message.contains("ICSID_CHAT_ID"));
    }

    #[test]
    fn window_converts_to_duration() {
        let s = settings(None, None);
        assert_eq!(s.command_window(), chrono::Duration::seconds(180));
    }
}
