//! Environment snapshot and typed value loaders.

use std::collections::HashMap;

use super::ConfigError;

/// An immutable snapshot of the key/value environment namespace.
///
/// All configuration parsing reads from a snapshot captured once at process
/// start. Tests supply their own pairs instead of mutating the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Builds a snapshot from explicit key/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the trimmed value for a key. A blank value counts as unset,
    /// matching how the deployment scripts leave placeholders empty.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Loads a required string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the key is absent or blank.
    pub fn required_str(&self, key: &'static str) -> Result<String, ConfigError> {
        self.value(key)
            .map(str::to_owned)
            .ok_or(ConfigError::Missing { key })
    }

    /// Loads a required integer value.
    pub fn required_int(&self, key: &'static str) -> Result<i64, ConfigError> {
        let raw = self.value(key).ok_or(ConfigError::Missing { key })?;
        parse_int(key, raw)
    }

    /// Loads an integer value if the key is set.
    pub fn int_if_set(&self, key: &'static str) -> Result<Option<i64>, ConfigError> {
        self.value(key).map(|raw| parse_int(key, raw)).transpose()
    }

    /// Loads an optional integer value, substituting the default when unset.
    pub fn optional_int(&self, key: &'static str, default: i64) -> Result<i64, ConfigError> {
        Ok(self.int_if_set(key)?.unwrap_or(default))
    }

    /// Loads an optional string value, substituting the default when unset.
    #[must_use]
    pub fn optional_str(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or(default).to_owned()
    }

    /// Loads an optional boolean flag.
    ///
    /// Recognizes `true`/`1`/`yes`/`y` and `false`/`0`/`no`/`n`
    /// case-insensitively; anything else, including an absent key, yields
    /// the default rather than an error.
    #[must_use]
    pub fn optional_bool(&self, key: &str, default: bool) -> bool {
        match self.value(key).map(str::to_ascii_lowercase).as_deref() {
            Some("true" | "1" | "yes" | "y") => true,
            Some("false" | "0" | "no" | "n") => false,
            _ => default,
        }
    }

    /// Loads an optional positive quantity, such as a byte size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] for zero or negative values and
    /// [`ConfigError::InvalidNumber`] for anything non-numeric.
    pub fn positive_int(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        match self.int_if_set(key)? {
            Some(value) if value > 0 => Ok(value.unsigned_abs()),
            Some(value) => Err(ConfigError::NonPositive { key, value }),
            None => Ok(default),
        }
    }

    /// Loads a required list of integer ids.
    ///
    /// Accepts either a comma-separated list (`"1, 2,3"`) or a JSON array
    /// literal (`"[1,2,3]"`, detected by the leading bracket).
    pub fn id_list(&self, key: &'static str) -> Result<Vec<i64>, ConfigError> {
        let raw = self.value(key).ok_or(ConfigError::Missing { key })?;
        parse_id_list(raw).map_err(|detail| ConfigError::InvalidList { key, detail })
    }
}

fn parse_int(key: &'static str, raw: &str) -> Result<i64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_owned(),
    })
}

/// Parses a comma-separated or JSON-array id list.
fn parse_id_list(raw: &str) -> Result<Vec<i64>, String> {
    if raw.starts_with('[') {
        serde_json::from_str(raw).map_err(|e| format!("not a valid JSON array of integers: {e}"))
    } else {
        raw.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>()
                    .map_err(|_| format!("{part:?} is not a valid integer"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_required_str_present() {
        let env = snapshot(&[("BOT_TOKEN", "123:abc")]);
        assert_eq!(env.required_str("BOT_TOKEN").unwrap(), "123:abc");
    }

    #[test]
    fn test_required_str_missing() {
        let env = snapshot(&[]);
        let err = env.required_str("BOT_TOKEN").unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: "BOT_TOKEN" }));
    }

    #[test]
    fn test_required_str_blank_is_missing() {
        let env = snapshot(&[("BOT_TOKEN", "   ")]);
        assert!(env.required_str("BOT_TOKEN").unwrap_err().is_missing());
    }

    #[test]
    fn test_required_int_invalid() {
        let env = snapshot(&[("API_ID", "not-a-number")]);
        let err = env.required_int("API_ID").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "API_ID", .. }));
    }

    #[test]
    fn test_optional_int_default_when_unset() {
        let env = snapshot(&[]);
        assert_eq!(env.optional_int("SUBSCRIPTION_DAYS", 30).unwrap(), 30);
    }

    #[test]
    fn test_optional_int_rejects_garbage() {
        let env = snapshot(&[("SUBSCRIPTION_DAYS", "soon")]);
        assert!(env.optional_int("SUBSCRIPTION_DAYS", 30).is_err());
    }

    #[test]
    fn test_optional_bool_truthy_values() {
        for raw in ["TRUE", "true", "1", "yes", "Y"] {
            let env = snapshot(&[("AUTO_SHORTEN", raw)]);
            assert!(env.optional_bool("AUTO_SHORTEN", false), "raw = {raw}");
        }
    }

    #[test]
    fn test_optional_bool_falsy_values() {
        for raw in ["false", "FALSE", "0", "no", "N"] {
            let env = snapshot(&[("AUTO_SHORTEN", raw)]);
            assert!(!env.optional_bool("AUTO_SHORTEN", true), "raw = {raw}");
        }
    }

    #[test]
    fn test_optional_bool_unset_uses_default() {
        let env = snapshot(&[]);
        assert!(env.optional_bool("AUTO_SHORTEN", true));
        assert!(!env.optional_bool("AUTO_SHORTEN", false));
    }

    #[test]
    fn test_optional_bool_blank_uses_default() {
        let env = snapshot(&[("AUTO_SHORTEN", "")]);
        assert!(env.optional_bool("AUTO_SHORTEN", true));
    }

    #[test]
    fn test_positive_int_rejects_zero() {
        let env = snapshot(&[("CHUNK_SIZE", "0")]);
        let err = env.positive_int("CHUNK_SIZE", 1).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { key: "CHUNK_SIZE", value: 0 }));
    }

    #[test]
    fn test_positive_int_rejects_negative() {
        let env = snapshot(&[("MAX_FILE_SIZE", "-1")]);
        assert!(env.positive_int("MAX_FILE_SIZE", 1).is_err());
    }

    #[test]
    fn test_id_list_comma_separated() {
        let env = snapshot(&[("ADMIN_IDS", "1, 2,3")]);
        assert_eq!(env.id_list("ADMIN_IDS").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_id_list_json_array() {
        let env = snapshot(&[("ADMIN_IDS", "[4,5,6]")]);
        assert_eq!(env.id_list("ADMIN_IDS").unwrap(), vec![4, 5, 6]);
    }

    #[test]
    fn test_id_list_garbage() {
        let env = snapshot(&[("ADMIN_IDS", "abc")]);
        let err = env.id_list("ADMIN_IDS").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidList { key: "ADMIN_IDS", .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_id_list_json_with_non_integers() {
        let env = snapshot(&[("ADMIN_IDS", "[1, \"two\"]")]);
        assert!(env.id_list("ADMIN_IDS").is_err());
    }

    #[test]
    fn test_id_list_missing() {
        let env = snapshot(&[]);
        assert!(env.id_list("ADMIN_IDS").unwrap_err().is_missing());
    }
}
