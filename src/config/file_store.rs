//! Configuration schema for the file-store deployment.
//!
//! This deployment keeps uploaded files in a Telegram storage chat, so its
//! schema adds the storage-chat target and the accepted media kinds on top
//! of the shared core.

use super::summary::{ConfigSummary, human_bytes};
use super::{
    ConfigError, CoreConfig, EnvSnapshot, DEFAULT_ALLOWED_FILE_TYPES, DEFAULT_MAX_FILE_SIZE_MB,
};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Validated configuration for the file-store bot.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Fields shared with every deployment.
    pub core: CoreConfig,

    /// Chat id used as the backing store for uploaded files. Channels and
    /// supergroups carry negative ids, so any integer is acceptable here.
    pub storage_chat_id: i64,

    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,

    /// Telegram media kinds the bot accepts.
    pub allowed_file_types: Vec<String>,
}

impl FileStoreConfig {
    /// Loads and validates the file-store configuration from an environment
    /// snapshot. Never returns a partially valid object.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending key if any required value is
    /// absent, malformed, or violates an invariant.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let core = CoreConfig::from_env(env)?;

        let storage_chat_id = match env.int_if_set("STORAGE_CHAT_ID")? {
            Some(id) => id,
            None => default_storage_chat(&core)?,
        };

        let max_file_size = env
            .positive_int("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE_MB)?
            .saturating_mul(BYTES_PER_MB);

        let allowed_file_types = match env.value("ALLOWED_FILE_TYPES") {
            Some(raw) => parse_type_list(raw)
                .map_err(|detail| ConfigError::InvalidList { key: "ALLOWED_FILE_TYPES", detail })?,
            None => DEFAULT_ALLOWED_FILE_TYPES
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
        };

        let config = Self {
            core,
            storage_chat_id,
            max_file_size,
            allowed_file_types,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field invariants for this deployment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.core.validate()
    }

    /// Builds the redacted diagnostic summary for this configuration.
    #[must_use]
    pub fn summary(&self) -> ConfigSummary {
        let mut summary = ConfigSummary::new("file-store");
        self.core.push_summary(&mut summary);
        summary.push("storage_chat_id", self.storage_chat_id.to_string());
        summary.push("max_file_size", human_bytes(self.max_file_size));
        summary.push("allowed_file_types", self.allowed_file_types.join(", "));
        summary
    }
}

/// Storage-chat derivation rule: an unset `STORAGE_CHAT_ID` falls back to
/// the first configured admin id.
fn default_storage_chat(core: &CoreConfig) -> Result<i64, ConfigError> {
    core.admin_ids.first().copied().ok_or(ConfigError::NoAdminIds)
}

/// Parses a comma-separated list of media kinds, rejecting blank entries.
fn parse_type_list(raw: &str) -> Result<Vec<String>, String> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                Err("list contains an empty entry".to_owned())
            } else {
                Ok(part.to_owned())
            }
        })
        .collect()
}
