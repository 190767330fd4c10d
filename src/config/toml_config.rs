use crate::utils::error::{DomainConnectError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DNS_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_DNS_ATTEMPTS: u64 = 2;
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConnectConfig {
    #[serde(default)]
    pub resolver: ResolverSection,
    #[serde(default)]
    pub http: HttpSection,
}

/// Upstream nameservers used for the `_domainconnect` lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nameservers {
    /// Whatever the host's resolver configuration says.
    #[default]
    System,
    Cloudflare,
    Google,
    Quad9,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverSection {
    #[serde(default)]
    pub nameservers: Nameservers,
    pub timeout_seconds: Option<u64>,
    pub attempts: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl DomainConnectConfig {
    /// Loads and validates a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after substituting `${VAR}` references from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self = toml::from_str(&processed_content).map_err(|e| {
            DomainConnectError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            }
        })?;
        config.validate_config()?;
        Ok(config)
    }

    // Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            DomainConnectError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(timeout) = self.resolver.timeout_seconds {
            validation::validate_positive_number("resolver.timeout_seconds", timeout, 1)?;
        }
        if let Some(attempts) = self.resolver.attempts {
            validation::validate_positive_number("resolver.attempts", attempts, 1)?;
        }
        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        if let Some(user_agent) = &self.http.user_agent {
            validation::validate_non_empty_string("http.user_agent", user_agent)?;
        }
        Ok(())
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(
            self.resolver
                .timeout_seconds
                .unwrap_or(DEFAULT_DNS_TIMEOUT_SECONDS),
        )
    }

    pub fn dns_attempts(&self) -> usize {
        self.resolver.attempts.unwrap_or(DEFAULT_DNS_ATTEMPTS) as usize
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(
            self.http
                .timeout_seconds
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS),
        )
    }

    pub fn user_agent(&self) -> String {
        self.http
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("domain-connect/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Validate for DomainConnectConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
