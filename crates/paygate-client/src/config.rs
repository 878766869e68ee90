//! # Gateway Configuration
//!
//! Configuration management for the gateway connection.
//! All secrets are loaded from environment variables.

use paygate_core::{GatewayError, GatewayResult};
use std::env;

/// Which gateway environment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production gateway
    Live,
    /// Merchant test gateway
    #[default]
    Test,
}

impl Environment {
    /// Base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Live => "https://api.paygate.com",
            Environment::Test => "https://api.test.paygate.com",
        }
    }

    fn parse(value: &str) -> GatewayResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "live" => Ok(Environment::Live),
            "test" => Ok(Environment::Test),
            other => Err(GatewayError::Configuration(format!(
                "PAYGATE_ENVIRONMENT must be `live` or `test`, got `{other}`"
            ))),
        }
    }
}

/// Gateway API configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API key (the Basic auth username)
    pub api_key: String,

    /// API secret (the Basic auth password)
    pub api_secret: String,

    /// Merchant account number, embedded in most request paths
    pub account_number: String,

    /// Gateway environment
    pub environment: Environment,

    /// Base URL override (for testing/mocking)
    base_url: Option<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYGATE_API_KEY`
    /// - `PAYGATE_API_SECRET`
    /// - `PAYGATE_ACCOUNT_NUMBER`
    ///
    /// Optional:
    /// - `PAYGATE_ENVIRONMENT` (`live` or `test`, defaults to `test`)
    pub fn from_env() -> GatewayResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("PAYGATE_API_KEY")
            .map_err(|_| GatewayError::Configuration("PAYGATE_API_KEY not set".to_string()))?;

        let api_secret = env::var("PAYGATE_API_SECRET")
            .map_err(|_| GatewayError::Configuration("PAYGATE_API_SECRET not set".to_string()))?;

        let account_number = env::var("PAYGATE_ACCOUNT_NUMBER").map_err(|_| {
            GatewayError::Configuration("PAYGATE_ACCOUNT_NUMBER not set".to_string())
        })?;

        let environment = match env::var("PAYGATE_ENVIRONMENT") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Test,
        };

        Self::new(api_key, api_secret, account_number).with_environment(environment).validated()
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            account_number: account_number.into(),
            environment: Environment::Test,
            base_url: None,
        }
    }

    /// Builder: select the gateway environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Builder: set custom base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Validate key and account formats
    pub fn validated(self) -> GatewayResult<Self> {
        if self.api_key.is_empty() {
            return Err(GatewayError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }
        if self.api_secret.is_empty() {
            return Err(GatewayError::Configuration(
                "API secret must not be empty".to_string(),
            ));
        }
        if self.account_number.is_empty() || !self.account_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(GatewayError::Configuration(
                "account number must be numeric".to_string(),
            ));
        }
        Ok(self)
    }

    /// Check if pointed at the merchant test environment
    pub fn is_test_mode(&self) -> bool {
        self.environment == Environment::Test
    }

    /// Effective base URL (override wins over environment)
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        let credentials = STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret));
        format!("Basic {credentials}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = GatewayConfig::new("devkey", "devsecret", "1001234567");
        // base64("devkey:devsecret")
        assert_eq!(config.auth_header(), "Basic ZGV2a2V5OmRldnNlY3JldA==");
    }

    #[test]
    fn test_environment_selection() {
        let config = GatewayConfig::new("k", "s", "1001234567");
        assert!(config.is_test_mode());
        assert_eq!(config.base_url(), "https://api.test.paygate.com");

        let live = config.clone().with_environment(Environment::Live);
        assert_eq!(live.base_url(), "https://api.paygate.com");

        let overridden = config.with_base_url("http://localhost:8080");
        assert_eq!(overridden.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_validation_rejects_bad_account() {
        let result = GatewayConfig::new("k", "s", "acct-abc").validated();
        assert!(matches!(result, Err(GatewayError::Configuration(_))));

        let result = GatewayConfig::new("", "s", "1001234567").validated();
        assert!(matches!(result, Err(GatewayError::Configuration(_))));

        assert!(GatewayConfig::new("k", "s", "1001234567").validated().is_ok());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("LIVE").unwrap(), Environment::Live);
        assert_eq!(Environment::parse("test").unwrap(), Environment::Test);
        assert!(Environment::parse("staging").is_err());
    }
}
