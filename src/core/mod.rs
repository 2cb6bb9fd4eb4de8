pub mod cipher;
pub mod convert;
pub mod debug;
pub mod duration;
pub mod html;
pub mod numbers;
pub mod pagerank;
pub mod request;
pub mod text;
pub mod user_agent;
pub mod validate;
pub mod xml;

pub use crate::utils::error::Result;

/// `application/x-www-form-urlencoded` escaping, spaces as `+`.
pub(crate) fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
