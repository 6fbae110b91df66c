use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::status::StatusCodeTable;

/// Default endpoint of the UK bank account validation service.
pub const DEFAULT_ACCOUNT_SERVICE_URL: &str =
    "https://services.postcodeanywhere.co.uk/BankAccountValidation/Interactive/Validate/v2.00/xmla.ws";

/// How lodgement record fields are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// Fields wrapped in `"` without escaping, byte-compatible with
    /// existing lodgement consumers.
    #[default]
    Legacy,
    /// Embedded `"` characters are doubled.
    Escaped,
}

/// Host-supplied configuration shared by all components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SepaConfig {
    /// API key for the UK account validation service. Empty means unset.
    pub api_key: Option<String>,
    /// Directory lodgement files are written to.
    pub output_dir: PathBuf,
    /// Base URL of the account validation service.
    pub account_service_url: String,
    /// Mandate status to BACS code mapping.
    pub status_codes: StatusCodeTable,
    /// Quoting of lodgement record fields.
    pub quote_style: QuoteStyle,
}

impl SepaConfig {
    /// The API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Default for SepaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            output_dir: std::env::temp_dir(),
            account_service_url: DEFAULT_ACCOUNT_SERVICE_URL.into(),
            status_codes: StatusCodeTable::default(),
            quote_style: QuoteStyle::Legacy,
        }
    }
}

/// Builder for [`SepaConfig`].
///
/// # Example
///
/// ```
/// use lastschrift::core::SepaConfigBuilder;
///
/// let config = SepaConfigBuilder::new("/var/lib/sepa/out")
///     .api_key("AA11-BB22-CC33-DD44")
///     .build();
/// assert_eq!(config.api_key(), Some("AA11-BB22-CC33-DD44"));
/// ```
pub struct SepaConfigBuilder {
    config: SepaConfig,
}

impl SepaConfigBuilder {
    /// Create a new builder writing lodgement files to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: SepaConfig {
                output_dir: output_dir.into(),
                ..Default::default()
            },
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn account_service_url(mut self, url: impl Into<String>) -> Self {
        self.config.account_service_url = url.into();
        self
    }

    pub fn status_codes(mut self, table: StatusCodeTable) -> Self {
        self.config.status_codes = table;
        self
    }

    pub fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.config.quote_style = style;
        self
    }

    pub fn build(self) -> SepaConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_is_absent() {
        let config = SepaConfigBuilder::new("/tmp").api_key("  ").build();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn defaults() {
        let config = SepaConfig::default();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.quote_style, QuoteStyle::Legacy);
        assert!(config.account_service_url.starts_with("https://"));
    }
}
