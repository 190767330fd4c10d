use crate::config::{DomainConnectConfig, Nameservers};
use crate::domain::ports::{TxtRecord, TxtResolver};
use crate::utils::error::{DomainConnectError, Result};
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

/// TXT lookups through hickory's tokio resolver.
pub struct HickoryTxtResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryTxtResolver {
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }

    pub fn from_config(config: &DomainConnectConfig) -> Result<Self> {
        let resolver = match config.resolver.nameservers {
            Nameservers::System => {
                let (resolver_config, mut options) = hickory_resolver::system_conf::read_system_conf()
                    .map_err(|e| DomainConnectError::ConfigValidationError {
                        field: "resolver.nameservers".to_string(),
                        message: format!("Could not read system resolver configuration: {}", e),
                    })?;
                apply_options(&mut options, config);
                TokioAsyncResolver::tokio(resolver_config, options)
            }
            upstream => {
                let resolver_config = match upstream {
                    Nameservers::Google => ResolverConfig::google(),
                    Nameservers::Quad9 => ResolverConfig::quad9(),
                    _ => ResolverConfig::cloudflare(),
                };
                let mut options = ResolverOpts::default();
                options.use_hosts_file = false;
                apply_options(&mut options, config);
                TokioAsyncResolver::tokio(resolver_config, options)
            }
        };

        Ok(Self { resolver })
    }
}

fn apply_options(options: &mut ResolverOpts, config: &DomainConnectConfig) {
    options.timeout = config.dns_timeout();
    options.attempts = config.dns_attempts();
    options.try_tcp_on_error = true;
}

// Trailing dot keeps search domains out of the query.
fn fully_qualified(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

#[async_trait]
impl TxtResolver for HickoryTxtResolver {
    async fn resolve_txt(&self, name: &str) -> Result<Option<Vec<TxtRecord>>> {
        debug!("Resolving TXT records for {}", name);

        match self.resolver.txt_lookup(fully_qualified(name)).await {
            Ok(lookup) => {
                let records: Vec<TxtRecord> = lookup
                    .iter()
                    .map(|txt| {
                        txt.txt_data()
                            .iter()
                            .map(|data| String::from_utf8_lossy(data).to_string())
                            .collect()
                    })
                    .collect();
                debug!("Found {} TXT record(s) for {}", records.len(), name);
                Ok(Some(records))
            }
            Err(e) => map_lookup_error(name, e),
        }
    }
}

// NXDOMAIN and empty answers both surface as NoRecordsFound.
fn map_lookup_error(name: &str, e: ResolveError) -> Result<Option<Vec<TxtRecord>>> {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => {
            debug!("No TXT records for {}", name);
            Ok(None)
        }
        _ => Err(DomainConnectError::transport(name, e)),
    }
}
