// Adapters layer: default implementations of the resolver and HTTP ports.

pub mod dns;
pub mod http;

pub use dns::HickoryTxtResolver;
pub use http::ReqwestHttpClient;
