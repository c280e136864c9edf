//! Configuration schema for the Wasabi upload deployment.
//!
//! This deployment pushes files to Wasabi's S3-compatible storage and gates
//! large uploads behind a paid subscription, so its schema adds the bucket
//! credentials, chunking limits, and subscription pricing on top of the
//! shared core.

use super::summary::{ConfigSummary, human_bytes, redact};
use super::{
    ConfigError, CoreConfig, EnvSnapshot, DEFAULT_CHUNK_SIZE, DEFAULT_SUBSCRIPTION_DAYS,
    DEFAULT_SUBSCRIPTION_PRICE, DEFAULT_WASABI_BUCKET, DEFAULT_WASABI_MAX_FILE_SIZE,
    DEFAULT_WASABI_REGION,
};

/// Region codes accepted by Wasabi's S3-compatible endpoints.
pub const WASABI_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-central-1",
    "us-west-1",
    "eu-central-1",
    "eu-central-2",
    "eu-west-1",
    "eu-west-2",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ca-central-1",
];

/// Validated configuration for the Wasabi upload bot.
#[derive(Debug, Clone)]
pub struct WasabiConfig {
    /// Fields shared with every deployment.
    pub core: CoreConfig,

    /// Wasabi access key id (secret; only a redacted prefix is ever logged).
    pub access_key: String,

    /// Wasabi secret access key (secret; only a redacted prefix is ever logged).
    pub secret_key: String,

    /// Destination bucket for uploads.
    pub bucket: String,

    /// Wasabi region code; always one of [`WASABI_REGIONS`].
    pub region: String,

    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,

    /// Multipart upload part size in bytes. Never exceeds `max_file_size`.
    pub chunk_size: u64,

    /// Subscription price in whole currency units.
    pub subscription_price: i64,

    /// Subscription length in days.
    pub subscription_days: i64,

    /// UPI collection address shown to subscribers. Empty hides payment info.
    pub upi_id: String,

    /// Account holder name shown alongside the UPI address.
    pub upi_name: String,
}

impl WasabiConfig {
    /// Loads and validates the Wasabi configuration from an environment
    /// snapshot. Never returns a partially valid object.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending key if any required value is
    /// absent, malformed, or violates an invariant.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let config = Self {
            core: CoreConfig::from_env(env)?,
            access_key: env.required_str("WASABI_ACCESS_KEY")?,
            secret_key: env.required_str("WASABI_SECRET_KEY")?,
            bucket: env.optional_str("WASABI_BUCKET", DEFAULT_WASABI_BUCKET),
            region: env.optional_str("WASABI_REGION", DEFAULT_WASABI_REGION),
            max_file_size: env.positive_int("MAX_FILE_SIZE", DEFAULT_WASABI_MAX_FILE_SIZE)?,
            chunk_size: env.positive_int("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            subscription_price: env
                .optional_int("SUBSCRIPTION_PRICE", DEFAULT_SUBSCRIPTION_PRICE)?,
            subscription_days: env.optional_int("SUBSCRIPTION_DAYS", DEFAULT_SUBSCRIPTION_DAYS)?,
            upi_id: env.optional_str("UPI_ID", ""),
            upi_name: env.optional_str("UPI_NAME", ""),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field invariants for this deployment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.core.validate()?;

        if !WASABI_REGIONS.contains(&self.region.as_str()) {
            return Err(ConfigError::UnknownRegion {
                region: self.region.clone(),
                valid: WASABI_REGIONS.join(", "),
            });
        }

        if self.chunk_size > self.max_file_size {
            return Err(ConfigError::ChunkExceedsMaxSize {
                chunk_size: self.chunk_size,
                max_file_size: self.max_file_size,
            });
        }

        if self.subscription_price <= 0 {
            return Err(ConfigError::NonPositive {
                key: "SUBSCRIPTION_PRICE",
                value: self.subscription_price,
            });
        }

        if self.subscription_days <= 0 {
            return Err(ConfigError::NonPositive {
                key: "SUBSCRIPTION_DAYS",
                value: self.subscription_days,
            });
        }

        Ok(())
    }

    /// S3 endpoint derived from the configured region.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("https://s3.{}.wasabisys.com", self.region)
    }

    /// Public URL of an uploaded object in the configured bucket.
    #[must_use]
    pub fn object_url(&self, object_name: &str) -> String {
        format!(
            "https://{}.s3.{}.wasabisys.com/{object_name}",
            self.bucket, self.region
        )
    }

    /// Builds the redacted diagnostic summary for this configuration.
    #[must_use]
    pub fn summary(&self) -> ConfigSummary {
        let mut summary = ConfigSummary::new("wasabi");
        self.core.push_summary(&mut summary);
        summary.push("access_key", redact(&self.access_key));
        summary.push("secret_key", redact(&self.secret_key));
        summary.push("bucket", self.bucket.clone());
        summary.push("region", self.region.clone());
        summary.push("endpoint", self.endpoint_url());
        summary.push("max_file_size", human_bytes(self.max_file_size));
        summary.push("chunk_size", human_bytes(self.chunk_size));
        summary.push(
            "subscription",
            format!("{} / {} days", self.subscription_price, self.subscription_days),
        );
        if !self.upi_id.is_empty() {
            summary.push("upi", format!("{} ({})", self.upi_id, self.upi_name));
        }
        summary
    }
}
