//! Client for the Domain Connect discovery and synchronous apply flow.
//!
//! A [`DomainConnect`] instance discovers the DNS provider of one domain
//! through its `_domainconnect` TXT record, loads the provider's settings,
//! and then answers template support queries and builds apply URLs.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{HickoryTxtResolver, ReqwestHttpClient};
pub use crate::config::DomainConnectConfig;
pub use crate::core::domain_connect::DomainConnect;
pub use crate::domain::model::{ProviderSettings, TemplateApplyProperties, TemplateSupportResponse};
pub use crate::domain::ports::{HttpClient, HttpResponse, TxtRecord, TxtResolver};
pub use crate::utils::error::{DomainConnectError, ErrorCategory, Result};
