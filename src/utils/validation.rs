use crate::utils::error::{DomainConnectError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that `url_str` is an absolute http(s) URL.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DomainConnectError::InvalidArgument {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DomainConnectError::InvalidArgument {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DomainConnectError::InvalidArgument {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Ids are inserted verbatim into provider URLs, so they must form exactly
/// one path segment.
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        Some("Value cannot be empty")
    } else if value.contains(['/', '?', '#']) {
        Some("Value cannot contain '/', '?' or '#'")
    } else if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("Value cannot contain whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainConnectError::InvalidArgument {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DomainConnectError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainConnectError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("redirect_uri", "https://example.com/cb").is_ok());
        assert!(validate_url("redirect_uri", "http://localhost:8080").is_ok());
        assert!(validate_url("redirect_uri", "").is_err());
        assert!(validate_url("redirect_uri", "not a url").is_err());
        assert!(validate_url("redirect_uri", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path_segment() {
        assert!(validate_path_segment("service_provider_id", "exampleservice.domainconnect.org").is_ok());
        assert!(validate_path_segment("service_id", "template1").is_ok());
        assert!(validate_path_segment("service_id", "").is_err());
        assert!(validate_path_segment("service_id", "a/b").is_err());
        assert!(validate_path_segment("service_id", "a?b=1").is_err());
        assert!(validate_path_segment("service_id", "a b").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("http.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("http.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("http.user_agent", "domain-connect/0.1").is_ok());
        assert!(validate_non_empty_string("http.user_agent", "   ").is_err());
    }
}
