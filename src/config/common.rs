//! Configuration fields shared by every bot deployment.

use std::sync::OnceLock;

use super::summary::{ConfigSummary, redact};
use super::{ConfigError, EnvSnapshot, DEFAULT_EXTERNAL_SERVICE_URL};

/// Telegram credentials, admin identity, and link settings common to the
/// file-store and Wasabi deployments.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Telegram API ID (obtain from <https://my.telegram.org>).
    pub api_id: i64,

    /// Telegram API hash (secret; only a redacted prefix is ever logged).
    pub api_hash: String,

    /// Bot token from `@BotFather` (secret; only a redacted prefix is ever logged).
    pub bot_token: String,

    /// User ids authorized for privileged bot operations. Never empty after
    /// validation; the first entry seeds the storage-chat default.
    pub admin_ids: Vec<i64>,

    /// GPLinks API key for the URL shortener. Empty disables shortening.
    pub url_shortener_api_key: String,

    /// Whether generated links are shortened automatically.
    pub auto_shorten: bool,

    /// Base URL of the external render/playback service.
    pub external_service_url: String,

    /// Username reported by Telegram once the bot authenticates.
    /// Unset at construction; written exactly once by the bot client.
    bot_username: OnceLock<String>,
}

impl CoreConfig {
    /// Loads the shared fields from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if a required key is absent or malformed. Cross-field
    /// invariants are checked separately in [`CoreConfig::validate`].
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        Ok(Self {
            api_id: env.required_int("API_ID")?,
            api_hash: env.required_str("API_HASH")?,
            bot_token: env.required_str("BOT_TOKEN")?,
            admin_ids: env.id_list("ADMIN_IDS")?,
            url_shortener_api_key: env.optional_str("GPLINKS_API_KEY", ""),
            auto_shorten: env.optional_bool("AUTO_SHORTEN", true),
            external_service_url: env.optional_str("RENDER_URL", DEFAULT_EXTERNAL_SERVICE_URL),
            bot_username: OnceLock::new(),
        })
    }

    /// Checks the cross-field invariants on the shared fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_id <= 0 {
            return Err(ConfigError::NonPositive {
                key: "API_ID",
                value: self.api_id,
            });
        }

        if self.admin_ids.is_empty() {
            return Err(ConfigError::NoAdminIds);
        }

        if let Some(&id) = self.admin_ids.iter().find(|&&id| id <= 0) {
            return Err(ConfigError::NonPositive {
                key: "ADMIN_IDS",
                value: id,
            });
        }

        Ok(())
    }

    /// Checks whether a user id belongs to a configured admin.
    #[must_use]
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Records the authenticated bot username. Only the first write wins.
    ///
    /// # Errors
    ///
    /// Returns the rejected value if a username was already recorded.
    pub fn set_bot_username(&self, username: String) -> Result<(), String> {
        self.bot_username.set(username)
    }

    /// Username recorded after authentication, if any.
    #[must_use]
    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.get().map(String::as_str)
    }

    /// Appends the shared fields to a summary, redacting secrets.
    pub(super) fn push_summary(&self, summary: &mut ConfigSummary) {
        summary.push("api_id", self.api_id.to_string());
        summary.push("api_hash", redact(&self.api_hash));
        summary.push("bot_token", redact(&self.bot_token));
        summary.push(
            "admin_ids",
            self.admin_ids
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        );
        if self.url_shortener_api_key.is_empty() {
            summary.push("url_shortener", "disabled".to_owned());
        } else {
            summary.push(
                "url_shortener",
                format!("gplinks (key {})", redact(&self.url_shortener_api_key)),
            );
        }
        summary.push("auto_shorten", self.auto_shorten.to_string());
        summary.push("external_service_url", self.external_service_url.clone());
        summary.push(
            "bot_username",
            self.bot_username().unwrap_or("(not authenticated)").to_owned(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_env() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("API_ID", "12345"),
            ("API_HASH", "0123456789abcdef"),
            ("BOT_TOKEN", "12345:AAbbCCdd"),
            ("ADMIN_IDS", "111, 222"),
        ])
    }

    #[test]
    fn test_from_env_parses_all_fields() {
        let config = CoreConfig::from_env(&valid_env()).unwrap();
        assert_eq!(config.api_id, 12345);
        assert_eq!(config.api_hash, "0123456789abcdef");
        assert_eq!(config.bot_token, "12345:AAbbCCdd");
        assert_eq!(config.admin_ids, vec![111, 222]);
        assert_eq!(config.url_shortener_api_key, "");
        assert!(config.auto_shorten);
        assert_eq!(config.external_service_url, DEFAULT_EXTERNAL_SERVICE_URL);
        assert!(config.bot_username().is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_api_hash() {
        let env = EnvSnapshot::from_pairs([
            ("API_ID", "12345"),
            ("BOT_TOKEN", "12345:AAbbCCdd"),
            ("ADMIN_IDS", "111"),
        ]);
        let err = CoreConfig::from_env(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: "API_HASH" }));
    }

    #[test]
    fn test_validate_rejects_zero_api_id() {
        let mut config = CoreConfig::from_env(&valid_env()).unwrap();
        config.api_id = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { key: "API_ID", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_admin_list() {
        let mut config = CoreConfig::from_env(&valid_env()).unwrap();
        config.admin_ids.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoAdminIds)));
    }

    #[test]
    fn test_validate_rejects_negative_admin_id() {
        let mut config = CoreConfig::from_env(&valid_env()).unwrap();
        config.admin_ids.push(-5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { key: "ADMIN_IDS", value: -5 })
        ));
    }

    #[test]
    fn test_is_admin() {
        let config = CoreConfig::from_env(&valid_env()).unwrap();
        assert!(config.is_admin(111));
        assert!(!config.is_admin(999));
    }

    #[test]
    fn test_bot_username_set_once() {
        let config = CoreConfig::from_env(&valid_env()).unwrap();
        config.set_bot_username("storebot".to_owned()).unwrap();
        assert_eq!(config.bot_username(), Some("storebot"));

        let rejected = config.set_bot_username("otherbot".to_owned());
        assert_eq!(rejected, Err("otherbot".to_owned()));
        assert_eq!(config.bot_username(), Some("storebot"));
    }
}
