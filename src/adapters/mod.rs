// Adapters layer: concrete implementations of the domain ports.

pub mod dns;
pub mod http;

pub use dns::DnsMxResolver;
pub use http::CurlClient;
