use crate::adapters::{HickoryTxtResolver, ReqwestHttpClient};
use crate::config::DomainConnectConfig;
use crate::core::apply_url;
use crate::core::discovery::{discover_provider_host, settings_for_host};
use crate::domain::model::{ProviderSettings, TemplateApplyProperties, TemplateSupportResponse};
use crate::domain::ports::{HttpClient, TxtResolver};
use crate::utils::error::{DomainConnectError, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type SharedResult<T> = Shared<BoxFuture<'static, Result<T>>>;

/// Domain Connect client bound to a single domain.
///
/// Discovery (the `_domainconnect` TXT lookup and the settings fetch) is
/// started once, when the instance is built, and every operation awaits that
/// same pending result. When built inside a tokio runtime the discovery is
/// spawned right away; otherwise it starts on the first await.
///
/// A domain without a provider record makes every settings-dependent
/// operation fail with [`DomainConnectError::NotSupported`].
/// [`DomainConnect::provider_host`] reports it as `Ok(None)` instead.
pub struct DomainConnect {
    domain: String,
    http: Arc<dyn HttpClient>,
    provider_host: SharedResult<Option<String>>,
    settings: SharedResult<Arc<ProviderSettings>>,
}

impl DomainConnect {
    /// Builds a client with the default resolver and HTTP settings.
    pub fn new(domain: impl Into<String>) -> Result<Self> {
        Self::from_config(domain, &DomainConnectConfig::default())
    }

    pub fn from_config(domain: impl Into<String>, config: &DomainConnectConfig) -> Result<Self> {
        let resolver = HickoryTxtResolver::from_config(config)?;
        let http = ReqwestHttpClient::from_config(config)?;
        Ok(Self::with_collaborators(
            domain,
            Arc::new(resolver),
            Arc::new(http),
        ))
    }

    pub fn with_collaborators(
        domain: impl Into<String>,
        resolver: Arc<dyn TxtResolver>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let domain = domain.into();

        let provider_host = {
            let domain = domain.clone();
            async move { discover_provider_host(resolver.as_ref(), &domain).await }
                .boxed()
                .shared()
        };

        let settings = {
            let domain = domain.clone();
            let http = Arc::clone(&http);
            let provider_host = provider_host.clone();
            async move {
                let host = provider_host.await?;
                settings_for_host(http.as_ref(), host, &domain)
                    .await
                    .map(Arc::new)
            }
            .boxed()
            .shared()
        };

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            debug!("Starting Domain Connect discovery for {}", domain);
            handle.spawn(settings.clone());
        }

        Self {
            domain,
            http,
            provider_host,
            settings,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Host named by the domain's `_domainconnect` TXT record, or `None` when
    /// there is no such record.
    pub async fn provider_host(&self) -> Result<Option<String>> {
        self.provider_host.clone().await
    }

    pub async fn provider_settings(&self) -> Result<Arc<ProviderSettings>> {
        self.settings.clone().await
    }

    /// Asks the provider whether it knows the given template. A 404 from the
    /// provider means it does not and yields `Ok(None)`.
    pub async fn query_support_template(
        &self,
        service_provider_id: &str,
        service_id: &str,
    ) -> Result<Option<TemplateSupportResponse>> {
        let settings = self.provider_settings().await?;
        let url =
            apply_url::template_support_url(&settings.url_api, service_provider_id, service_id)?;

        let response = self.http.get(&url).await?;
        match response.status {
            404 => {
                debug!(
                    "Template {}/{} not supported by {}",
                    service_provider_id, service_id, settings.provider_id
                );
                Ok(None)
            }
            _ if response.is_success() => serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| DomainConnectError::invalid_response(&url, e)),
            status => {
                warn!("Template query to {} returned {}", url, status);
                Err(DomainConnectError::UnexpectedStatus { url, status })
            }
        }
    }

    /// Builds the synchronous apply URL the end user should be sent to.
    ///
    /// The query holds `properties` in insertion order followed by `domain`.
    pub async fn apply_template_sync_url(
        &self,
        service_provider_id: &str,
        service_id: &str,
        properties: Option<&TemplateApplyProperties>,
    ) -> Result<String> {
        let settings = self.provider_settings().await?;
        let url_sync_ux =
            settings
                .url_sync_ux
                .as_deref()
                .ok_or_else(|| DomainConnectError::MissingSetting {
                    provider_id: settings.provider_id.clone(),
                    field: "urlSyncUX",
                })?;

        apply_url::apply_template_sync_url(
            url_sync_ux,
            &self.domain,
            service_provider_id,
            service_id,
            properties,
        )
    }
}

impl fmt::Debug for DomainConnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainConnect")
            .field("domain", &self.domain)
            .field("settings", &self.settings.peek())
            .finish_non_exhaustive()
    }
}
