//! Provider discovery: `_domainconnect` TXT lookup followed by the settings
//! fetch from the discovered host.

use crate::domain::model::ProviderSettings;
use crate::domain::ports::{HttpClient, TxtResolver};
use crate::utils::error::{DomainConnectError, Result};
use tracing::{debug, info, warn};

pub const DISCOVERY_PREFIX: &str = "_domainconnect";

pub fn discovery_name(domain: &str) -> String {
    format!("{}.{}", DISCOVERY_PREFIX, domain)
}

pub fn settings_url(provider_host: &str, domain: &str) -> String {
    format!("https://{}/v2/{}/settings", provider_host, domain)
}

/// Looks up the provider host for `domain`.
///
/// `Ok(None)` means the domain publishes no provider: the name has no TXT
/// records, or the first string of the first record is empty. A record that
/// is not a bare host name is [`DomainConnectError::InvalidProviderHost`].
pub async fn discover_provider_host(
    resolver: &dyn TxtResolver,
    domain: &str,
) -> Result<Option<String>> {
    let name = discovery_name(domain);
    let records = resolver.resolve_txt(&name).await?;

    let host = records
        .as_deref()
        .and_then(|records| records.first())
        .and_then(|record| record.first())
        .filter(|host| !host.is_empty())
        .cloned();

    if let Some(host) = &host {
        validate_provider_host(domain, host)?;
    }

    match &host {
        Some(host) => info!("Discovered Domain Connect provider {} for {}", host, domain),
        None => warn!("No Domain Connect provider published at {}", name),
    }
    Ok(host)
}

// The host is spliced into the settings URL, so it may not carry a path,
// query, fragment or credentials.
fn validate_provider_host(domain: &str, host: &str) -> Result<()> {
    url::Host::parse(host)
        .map(|_| ())
        .map_err(|e| {
            warn!("Rejected provider host {:?} for {}: {}", host, domain, e);
            DomainConnectError::InvalidProviderHost {
                domain: domain.to_string(),
                host: host.to_string(),
                reason: e.to_string(),
            }
        })
}

pub async fn fetch_provider_settings(
    http: &dyn HttpClient,
    provider_host: &str,
    domain: &str,
) -> Result<ProviderSettings> {
    let url = settings_url(provider_host, domain);
    let response = http.get(&url).await?;

    if !response.is_success() {
        warn!("Settings request to {} returned {}", url, response.status);
        return Err(DomainConnectError::UnexpectedStatus {
            url,
            status: response.status,
        });
    }

    let settings: ProviderSettings = serde_json::from_str(&response.body)
        .map_err(|e| DomainConnectError::invalid_response(&url, e))?;
    debug!(
        "Provider {} ({}) settings loaded for {}",
        settings.provider_name, settings.provider_id, domain
    );
    Ok(settings)
}

/// Full discovery. A domain without a provider record is
/// [`DomainConnectError::NotSupported`].
pub async fn discover(
    resolver: &dyn TxtResolver,
    http: &dyn HttpClient,
    domain: &str,
) -> Result<ProviderSettings> {
    let host = discover_provider_host(resolver, domain).await?;
    settings_for_host(http, host, domain).await
}

/// Second discovery step: settings for a discovered host, or
/// [`DomainConnectError::NotSupported`] when there is none.
pub async fn settings_for_host(
    http: &dyn HttpClient,
    provider_host: Option<String>,
    domain: &str,
) -> Result<ProviderSettings> {
    match provider_host {
        Some(host) => fetch_provider_settings(http, &host, domain).await,
        None => Err(DomainConnectError::NotSupported {
            domain: domain.to_string(),
        }),
    }
}
