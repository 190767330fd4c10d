use std::sync::Arc;
use thiserror::Error;

type BoxedSource = Arc<dyn std::error::Error + Send + Sync>;

/// Errors produced while discovering a provider or talking to it.
///
/// The type is `Clone` because a single settings resolution is shared by every
/// caller of a [`DomainConnect`](crate::DomainConnect) instance.
#[derive(Error, Debug, Clone)]
pub enum DomainConnectError {
    #[error("Domain {domain} does not publish a Domain Connect provider")]
    NotSupported { domain: String },

    #[error("Request to {target} failed: {source}")]
    Transport {
        target: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response body from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    #[error("Domain {domain} names an invalid provider host '{host}': {reason}")]
    InvalidProviderHost {
        domain: String,
        host: String,
        reason: String,
    },

    #[error("Provider {provider_id} does not publish {field}")]
    MissingSetting {
        provider_id: String,
        field: &'static str,
    },

    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}': '{value}' - {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotSupported,
    Transport,
    Protocol,
    Usage,
    Configuration,
}

impl DomainConnectError {
    pub fn transport<E>(target: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DomainConnectError::Transport {
            target: target.into(),
            source: Arc::new(source),
        }
    }

    pub fn invalid_response(url: impl Into<String>, source: serde_json::Error) -> Self {
        DomainConnectError::InvalidResponse {
            url: url.into(),
            source: Arc::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainConnectError::NotSupported { .. } => ErrorCategory::NotSupported,
            DomainConnectError::Transport { .. } => ErrorCategory::Transport,
            DomainConnectError::UnexpectedStatus { .. }
            | DomainConnectError::InvalidResponse { .. }
            | DomainConnectError::InvalidProviderHost { .. }
            | DomainConnectError::MissingSetting { .. } => ErrorCategory::Protocol,
            DomainConnectError::InvalidArgument { .. } => ErrorCategory::Usage,
            DomainConnectError::Io(_)
            | DomainConnectError::ConfigValidationError { .. }
            | DomainConnectError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self, DomainConnectError::NotSupported { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotSupported => {
                "The domain's DNS provider does not support Domain Connect; configure records manually"
            }
            ErrorCategory::Transport => "Check network connectivity and DNS settings, then try again",
            ErrorCategory::Protocol => "The provider returned an unexpected response; contact the DNS provider",
            ErrorCategory::Usage => "Check the provider id and service id arguments",
            ErrorCategory::Configuration => "Check the configuration file and its values",
        }
    }
}

impl From<std::io::Error> for DomainConnectError {
    fn from(e: std::io::Error) -> Self {
        DomainConnectError::Io(Arc::new(e))
    }
}

pub type Result<T> = std::result::Result<T, DomainConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let not_supported = DomainConnectError::NotSupported {
            domain: "example.org".to_string(),
        };
        assert_eq!(not_supported.category(), ErrorCategory::NotSupported);
        assert!(not_supported.is_not_supported());

        let status = DomainConnectError::UnexpectedStatus {
            url: "https://provider.test/v2/example.org/settings".to_string(),
            status: 500,
        };
        assert_eq!(status.category(), ErrorCategory::Protocol);
        assert!(!status.is_not_supported());

        let bad_host = DomainConnectError::InvalidProviderHost {
            domain: "example.org".to_string(),
            host: "dc.provider.test/evil".to_string(),
            reason: "invalid domain character".to_string(),
        };
        assert_eq!(bad_host.category(), ErrorCategory::Protocol);

        let io: DomainConnectError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(io.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_messages_name_the_failing_target() {
        let err = DomainConnectError::transport(
            "_domainconnect.example.org",
            std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"),
        );
        let message = err.to_string();
        assert!(message.contains("_domainconnect.example.org"));
        assert!(message.contains("timed out"));

        let status = DomainConnectError::UnexpectedStatus {
            url: "https://provider.test/v2/example.org/settings".to_string(),
            status: 503,
        };
        assert!(status.to_string().contains("503"));
        assert!(status.to_string().contains("provider.test"));
    }

    #[test]
    fn test_clone_keeps_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DomainConnectError::invalid_response("https://provider.test", parse_err);
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
        assert!(std::error::Error::source(&cloned).is_some());
    }
}
