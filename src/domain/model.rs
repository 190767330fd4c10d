use serde::{Deserialize, Serialize};

/// Configuration a DNS provider publishes at `/v2/<domain>/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    pub provider_id: String,
    pub provider_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_display_name: Option<String>,
    #[serde(rename = "urlSyncUX", default, skip_serializing_if = "Option::is_none")]
    pub url_sync_ux: Option<String>,
    #[serde(rename = "urlAsyncUX", default, skip_serializing_if = "Option::is_none")]
    pub url_async_ux: Option<String>,
    #[serde(rename = "urlAPI")]
    pub url_api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_control_panel: Option<String>,
    #[serde(default)]
    pub name_servers: Vec<String>,
}

/// Returned by a provider that knows a given service template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSupportResponse {
    pub version: String,
}

/// Variables passed to a template apply request.
///
/// Entries keep insertion order. Setting an existing key replaces its value
/// in place. Entries whose value is `None` are kept but never serialized.
///
/// [`TemplateApplyProperties::new`] is the only constructor, so `redirect_uri`
/// is always present; clearing it through [`TemplateApplyProperties::set`] is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateApplyProperties {
    entries: Vec<(String, Option<String>)>,
}

impl TemplateApplyProperties {
    pub const REDIRECT_URI: &'static str = "redirect_uri";
    pub const HOST: &'static str = "host";
    pub const STATE: &'static str = "state";
    pub const PROVIDER_NAME: &'static str = "providerName";
    pub const SERVICE_NAME: &'static str = "serviceName";
    pub const SIG: &'static str = "sig";

    pub fn new(redirect_uri: impl Into<String>) -> Self {
        Self {
            entries: vec![(Self::REDIRECT_URI.to_string(), Some(redirect_uri.into()))],
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        let key = key.into();
        if key == Self::REDIRECT_URI && value.is_none() {
            return self;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.set(Self::HOST, Some(host.into()));
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.set(Self::STATE, Some(state.into()));
        self
    }

    pub fn with_provider_name(mut self, provider_name: impl Into<String>) -> Self {
        self.set(Self::PROVIDER_NAME, Some(provider_name.into()));
        self
    }

    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.set(Self::SERVICE_NAME, Some(service_name.into()));
        self
    }

    pub fn with_sig(mut self, sig: impl Into<String>) -> Self {
        self.set(Self::SIG, Some(sig.into()));
        self
    }

    /// Adds a template substitution variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.get(Self::REDIRECT_URI)
    }

    /// Entries with a value, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> Extend<(K, Option<String>)> for TemplateApplyProperties {
    fn extend<I: IntoIterator<Item = (K, Option<String>)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
