use crate::utils::error::Result;
use async_trait::async_trait;

/// A TXT record as an ordered list of character strings.
pub type TxtRecord = Vec<String>;

/// Looks up TXT records.
#[async_trait]
pub trait TxtResolver: Send + Sync {
    /// Returns `Ok(None)` when the name has no TXT records (NXDOMAIN or an
    /// empty answer). Any other failure is an error.
    async fn resolve_txt(&self, name: &str) -> Result<Option<Vec<TxtRecord>>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests. Non-success statuses are returned, not raised.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}
