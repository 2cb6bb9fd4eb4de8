use crate::domain::model::{FetchRequest, FetchResponse, ServerVars};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read access to the server variables of the request being handled.
pub trait RequestContext: Send + Sync {
    fn var(&self, key: &str) -> Option<&str>;

    /// Set and non-empty.
    fn non_empty_var(&self, key: &str) -> Option<&str> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

impl RequestContext for ServerVars {
    fn var(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl RequestContext for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse>;

    /// Body of a plain GET.
    async fn fetch_contents(&self, url: &str) -> Result<String> {
        Ok(self.fetch(&FetchRequest::get(url)).await?.contents)
    }
}

#[async_trait]
pub trait MxResolver: Send + Sync {
    /// True when the domain publishes at least one MX record.
    async fn has_mx(&self, domain: &str) -> Result<bool>;
}
