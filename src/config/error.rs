//! Configuration error taxonomy.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
///
/// Every variant names the offending environment key so operators can fix
/// the deployment and restart. All of these are fatal at startup; no
/// partially loaded configuration is ever handed to the rest of the bot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}")]
    Missing { key: &'static str },

    #[error("Invalid value for {key}: {value:?} is not an integer")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Invalid value for {key}: {detail}")]
    InvalidList { key: &'static str, detail: String },

    #[error("Invalid value for {key}: {value} (must be positive)")]
    NonPositive { key: &'static str, value: i64 },

    #[error("ADMIN_IDS must contain at least one user id")]
    NoAdminIds,

    #[error("Unknown Wasabi region: {region} (valid regions: {valid})")]
    UnknownRegion { region: String, valid: String },

    #[error("CHUNK_SIZE ({chunk_size} bytes) cannot exceed MAX_FILE_SIZE ({max_file_size} bytes)")]
    ChunkExceedsMaxSize { chunk_size: u64, max_file_size: u64 },
}

impl ConfigError {
    /// Whether this error reports an absent required key, as opposed to a
    /// present but malformed or constraint-violating value.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_names_key() {
        let err = ConfigError::Missing { key: "BOT_TOKEN" };
        assert!(err.to_string().contains("BOT_TOKEN"));
        assert!(err.is_missing());
    }

    #[test]
    fn test_invalid_is_not_missing() {
        let err = ConfigError::InvalidNumber {
            key: "API_ID",
            value: "abc".to_owned(),
        };
        assert!(err.to_string().contains("API_ID"));
        assert!(!err.is_missing());
    }
}
