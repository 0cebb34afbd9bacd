//! Controller settings.
//!
//! Settings are loaded once, usually from the environment, and handed to
//! every controller the host mounts.
//!
//! # Example
//!
//! ```rust,ignore
//! use admin_query::settings::Settings;
//!
//! let settings = Settings::from_env()?;
//! println!("debounce: {:?}", settings.debounce);
//! ```

use std::env;
use std::num::ParseIntError;
use std::str::ParseBoolError;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quiet interval used when nothing else is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Environment variable holding the debounce interval in milliseconds.
pub const DEBOUNCE_MS_VAR: &str = "ADMIN_QUERY_DEBOUNCE_MS";
/// Environment variable overriding every resource's default page size.
pub const PAGE_SIZE_VAR: &str = "ADMIN_QUERY_PAGE_SIZE";
/// Environment variable toggling failure notices.
pub const NOTIFY_ON_FAILURE_VAR: &str = "ADMIN_QUERY_NOTIFY_ON_FAILURE";

/// Errors raised while loading [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Settings shared by the controllers of one host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Settings {
    /// Quiet interval before a debounced text input is committed.
    #[cfg_attr(feature = "serde", serde(with = "duration_millis"))]
    pub debounce: Duration,
    /// Page size used instead of each resource's default, when set.
    pub page_size_override: Option<u32>,
    /// Whether fetch failures raise a transient notice.
    pub notify_on_failure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            page_size_override: None,
            notify_on_failure: true,
        }
    }
}

impl Settings {
    /// Loads settings from environment variables.
    ///
    /// A `.env` file is read first if present. Unset variables keep their
    /// defaults.
    ///
    /// # Environment Variables
    ///
    /// - `ADMIN_QUERY_DEBOUNCE_MS`: debounce interval (optional, default: 300)
    /// - `ADMIN_QUERY_PAGE_SIZE`: page size override (optional, must be positive)
    /// - `ADMIN_QUERY_NOTIFY_ON_FAILURE`: `true` or `false` (optional, default: true)
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if a variable is set but invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::settings::Settings;
    /// use std::time::Duration;
    ///
    /// let settings = Settings::from_lookup(|key| match key {
    ///     "ADMIN_QUERY_DEBOUNCE_MS" => Some("150".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(settings.debounce, Duration::from_millis(150));
    /// assert!(settings.notify_on_failure);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let debounce = lookup(DEBOUNCE_MS_VAR)
            .map(|raw| parse_int::<u64>(DEBOUNCE_MS_VAR, &raw).map(Duration::from_millis))
            .transpose()?
            .unwrap_or(defaults.debounce);

        let page_size_override = lookup(PAGE_SIZE_VAR)
            .map(|raw| {
                let size = parse_int::<u32>(PAGE_SIZE_VAR, &raw)?;
                if size == 0 {
                    return Err(SettingsError::InvalidValue {
                        key: PAGE_SIZE_VAR.to_string(),
                        message: "must be at least 1".to_string(),
                    });
                }
                Ok(size)
            })
            .transpose()?;

        let notify_on_failure = lookup(NOTIFY_ON_FAILURE_VAR)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|error: ParseBoolError| SettingsError::InvalidValue {
                        key: NOTIFY_ON_FAILURE_VAR.to_string(),
                        message: error.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(defaults.notify_on_failure);

        Ok(Self {
            debounce,
            page_size_override,
            notify_on_failure,
        })
    }

    /// Sets the debounce interval.
    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Overrides the page size of every resource.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size_override = Some(page_size);
        self
    }

    /// Enables or disables failure notices.
    #[must_use]
    pub const fn with_notify_on_failure(mut self, notify: bool) -> Self {
        self.notify_on_failure = notify;
        self
    }
}

fn parse_int<T>(key: &str, raw: &str) -> Result<T, SettingsError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    raw.trim()
        .parse()
        .map_err(|error: ParseIntError| SettingsError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })
}

#[cfg(feature = "serde")]
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[rstest]
    fn test_empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.debounce, Duration::from_millis(300));
    }

    #[rstest]
    fn test_all_variables_set() {
        let settings = Settings::from_lookup(lookup_from(&[
            (DEBOUNCE_MS_VAR, "500"),
            (PAGE_SIZE_VAR, " 20 "),
            (NOTIFY_ON_FAILURE_VAR, "false"),
        ]))
        .unwrap();
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert_eq!(settings.page_size_override, Some(20));
        assert!(!settings.notify_on_failure);
    }

    #[rstest]
    #[case(DEBOUNCE_MS_VAR, "soon")]
    #[case(PAGE_SIZE_VAR, "-1")]
    #[case(PAGE_SIZE_VAR, "0")]
    #[case(NOTIFY_ON_FAILURE_VAR, "maybe")]
    fn test_invalid_value_names_the_variable(#[case] key: &str, #[case] raw: &str) {
        let error = Settings::from_lookup(lookup_from(&[(key, raw)])).unwrap_err();
        let SettingsError::InvalidValue { key: reported, .. } = error;
        assert_eq!(reported, key);
    }

    #[rstest]
    fn test_error_display() {
        let error = SettingsError::InvalidValue {
            key: PAGE_SIZE_VAR.to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for ADMIN_QUERY_PAGE_SIZE: must be at least 1"
        );
    }

    // =========================================================================
    // Builders
    // =========================================================================

    #[rstest]
    fn test_builders() {
        let settings = Settings::default()
            .with_debounce(Duration::ZERO)
            .with_page_size(10)
            .with_notify_on_failure(false);
        assert_eq!(settings.debounce, Duration::ZERO);
        assert_eq!(settings.page_size_override, Some(10));
        assert!(!settings.notify_on_failure);
    }
}
