pub mod apply_url;
pub mod discovery;
pub mod domain_connect;

pub use crate::domain::model::{ProviderSettings, TemplateApplyProperties, TemplateSupportResponse};
pub use crate::domain::ports::{HttpClient, HttpResponse, TxtRecord, TxtResolver};
pub use crate::utils::error::Result;
