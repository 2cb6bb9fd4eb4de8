use crate::app::embed::{self, EmbedProvider};
use crate::app::successful_contents;
use crate::config::EndpointConfig;
use crate::core::convert::object_to_array;
use crate::core::pagerank;
use crate::core::request::client_ip;
use crate::core::urlencode;
use crate::core::xml::XmlNode;
use crate::domain::model::{FetchRequest, WikiEntry};
use crate::domain::ports::{Fetcher, RequestContext};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid scheme pattern"));

static META_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<\s*meta\s*http-equiv="?([^>"]*)"?\s*content="?([^>"]*)"?\s*/?\s*>"#)
        .expect("valid meta tag pattern")
});

fn with_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Helpers backed by third-party web services.
///
/// Every lookup answers `None` when the service is unreachable or its reply
/// is unusable; the cause is logged at `warn`.
pub struct WebRecipes<F: Fetcher> {
    fetcher: F,
    endpoints: EndpointConfig,
    embed_providers: Vec<EmbedProvider>,
}

impl<F: Fetcher> WebRecipes<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_endpoints(fetcher, EndpointConfig::default())
    }

    pub fn with_endpoints(fetcher: F, endpoints: EndpointConfig) -> Self {
        Self {
            fetcher,
            endpoints,
            embed_providers: EmbedProvider::defaults(),
        }
    }

    pub fn with_embed_providers(mut self, providers: Vec<EmbedProvider>) -> Self {
        self.embed_providers = providers;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    async fn contents(&self, url: &str) -> Option<String> {
        successful_contents(&self.fetcher, url).await
    }

    async fn xml(&self, url: &str) -> Option<XmlNode> {
        let body = self.contents(url).await?;
        match XmlNode::parse(&body) {
            Ok(root) => Some(root),
            Err(e) => {
                tracing::warn!("unreadable XML from {}: {}", url, e);
                None
            }
        }
    }

    async fn json(&self, url: &str) -> Option<Value> {
        let body = self.contents(url).await?;
        match serde_json::from_str(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("unreadable JSON from {}: {}", url, e);
                None
            }
        }
    }

    /// The feed's root element as a map.
    pub async fn rss_reader(&self, url: &str) -> Option<Map<String, Value>> {
        let root = self.xml(&with_scheme(url)).await?;
        object_to_array(&root.to_value()).ok()
    }

    /// Where a short link points: the redirect target, or failing that the
    /// page's meta refresh target.
    pub async fn expand_short_url(&self, short_url: &str) -> Option<String> {
        if short_url.is_empty() {
            return None;
        }

        let request = FetchRequest::get(short_url).without_redirects();
        let response = match self.fetcher.fetch(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("could not expand {}: {}", short_url, e);
                return None;
            }
        };

        if let Some(location) = response.info.header("location") {
            let resolved = Url::parse(short_url)
                .and_then(|base| base.join(location))
                .map(String::from)
                .unwrap_or_else(|_| location.to_string());
            return Some(resolved);
        }
        if !response.info.is_success() {
            tracing::warn!("could not expand {}: HTTP {}", short_url, response.info.status);
            return None;
        }

        META_TAG
            .captures_iter(&response.contents)
            .filter(|caps| caps[1].trim().eq_ignore_ascii_case("refresh"))
            .last()
            .and_then(|caps| {
                caps[2]
                    .splitn(2, '=')
                    .nth(1)
                    .filter(|target| !target.is_empty())
                    .map(str::to_string)
            })
    }

    pub async fn alexa_rank(&self, domain: &str) -> Option<u64> {
        let domain = SCHEME.replace(domain, "");
        let url = format!(
            "{}?cli=10&dat=s&url={}",
            self.endpoints.alexa,
            urlencode(&domain)
        );
        let root = self.xml(&url).await?;
        let popularity = root.children_named("SD").nth(1)?.child("POPULARITY")?;
        Some(
            popularity
                .attr("TEXT")
                .and_then(|text| text.trim().parse().ok())
                .unwrap_or(0),
        )
    }

    pub async fn google_page_rank(&self, url: &str) -> Option<u32> {
        let query = pagerank::toolbar_query(&self.endpoints.pagerank, url);
        let body = self.contents(&query).await?;
        pagerank::parse_rank(&body)
    }

    pub async fn tiny_url(&self, url: &str) -> Option<String> {
        let query = format!(
            "{}?url={}",
            self.endpoints.tinyurl,
            urlencode(&with_scheme(url))
        );
        let body = self.contents(&query).await?;
        let tiny = body.trim();
        (!tiny.is_empty()).then(|| tiny.to_string())
    }

    /// Google's autocomplete suggestions for `keyword`.
    pub async fn keyword_suggestions(&self, keyword: &str) -> Option<Vec<String>> {
        let url = format!(
            "{}?output=firefox&client=firefox&hl=en-US&q={}",
            self.endpoints.google_suggest,
            urlencode(keyword)
        );
        let data = self.json(&url).await?;
        let suggestions: Vec<String> = data
            .get(1)?
            .as_array()?
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();
        (!suggestions.is_empty()).then_some(suggestions)
    }

    /// First Wikipedia opensearch hit that has a description.
    pub async fn wiki_search(&self, keyword: &str) -> Option<WikiEntry> {
        let url = format!(
            "{}?action=opensearch&search={}&format=xml&limit=1",
            self.endpoints.wikipedia,
            urlencode(keyword)
        );
        let root = self.xml(&url).await?;
        let item = root.child("Section")?.child("Item")?;

        let description = item.child("Description").map(XmlNode::text)?;
        if description.is_empty() {
            return None;
        }
        let text_of = |name: &str| {
            item.child(name)
                .map(|node| node.text().to_string())
                .unwrap_or_default()
        };

        Some(WikiEntry {
            title: text_of("Text"),
            description: description.to_string(),
            url: text_of("Url"),
            image: item
                .child("Image")
                .and_then(|image| image.attr("source"))
                .map(|source| source.replace("/50px-", "/200px-")),
        })
    }

    /// `"<city>, <country code>"` for the client's address.
    pub async fn client_location(&self, ctx: &impl RequestContext) -> Option<String> {
        let ip = client_ip(ctx, None).unwrap_or_default();
        let url = format!("{}?ip={}", self.endpoints.geoplugin, urlencode(&ip));
        let data = self.json(&url).await?;

        let field = |key: &str| data.get(key).and_then(Value::as_str).unwrap_or_default();
        if field("geoplugin_countryName").is_empty() {
            return None;
        }
        Some(format!(
            "{}, {}",
            field("geoplugin_city"),
            field("geoplugin_countryCode")
        ))
    }

    /// See [`embed::auto_embed`]. `None` sizes fall back to 560x315.
    pub async fn auto_embed(&self, text: &str, width: Option<u32>, height: Option<u32>) -> String {
        embed::auto_embed(
            &self.fetcher,
            &self.embed_providers,
            text,
            width.unwrap_or(embed::DEFAULT_WIDTH),
            height.unwrap_or(embed::DEFAULT_HEIGHT),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_scheme() {
        assert_eq!(with_scheme("example.com"), "http://example.com");
        assert_eq!(with_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_meta_refresh_pattern() {
        let html = r#"<html><head><META HTTP-EQUIV="Refresh" CONTENT="0;URL=http://example.com/long"></head></html>"#;
        let caps = META_TAG.captures(html).unwrap();
        assert_eq!(&caps[1], "Refresh");
        assert_eq!(&caps[2], "0;URL=http://example.com/long");
    }
}
