use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Ordered HTML attributes, rendered as `key="value"` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute, replacing the value of an existing key in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `foo="bar" baz="qux"`; values are written as given.
    pub fn to_html(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// CGI-style server variables (`HTTPS`, `HTTP_HOST`, `REMOTE_ADDR`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerVars {
    vars: HashMap<String, String>,
}

impl ServerVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Maps request headers to their CGI names: `X-Forwarded-For` becomes
    /// `HTTP_X_FORWARDED_FOR`. `Content-Type` and `Content-Length` keep no prefix.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut vars = ServerVars::new();
        for (name, value) in headers {
            let cgi = name.as_ref().trim().to_ascii_uppercase().replace('-', "_");
            let key = match cgi.as_str() {
                "CONTENT_TYPE" | "CONTENT_LENGTH" => cgi,
                _ => format!("HTTP_{}", cgi),
            };
            vars.set(key, value);
        }
        vars
    }

    /// Reads the process environment, as a CGI program sees its request.
    pub fn from_env() -> Self {
        std::env::vars().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ServerVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = ServerVars::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    pub platform: String,
}

impl fmt::Display for BrowserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Version: {}, {}", self.name, self.version, self.platform)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl std::str::FromStr for Method {
    type Err = crate::utils::error::RecipeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(crate::utils::error::RecipeError::ConfigError {
                message: format!("Unsupported HTTP method: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestData {
    Form(Vec<(String, String)>),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub data: Option<RequestData>,
    pub headers: Vec<(String, String)>,
    pub auth: Option<BasicAuth>,
    pub follow_redirects: bool,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            data: None,
            headers: Vec::new(),
            auth: None,
            follow_redirects: true,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn with_form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.data = Some(RequestData::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.data = Some(RequestData::Raw(body.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// The URL actually requested. GET data travels in the query string.
    pub fn target_url(&self) -> String {
        if self.method != Method::Get {
            return self.url.clone();
        }

        let query = match &self.data {
            None => return self.url.clone(),
            Some(RequestData::Raw(raw)) => raw.clone(),
            Some(RequestData::Form(pairs)) => url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter())
                .finish(),
        };

        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInfo {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub total_time: Duration,
}

impl TransferInfo {
    /// Header lookup; names are stored lowercase.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub contents: String,
    pub info: TransferInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiEntry {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_insertion_order() {
        let attrs = Attributes::from([("foo", "bar"), ("baz", "qux")]);
        assert_eq!(attrs.to_html(), r#"foo="bar" baz="qux""#);

        let attrs = attrs.with("foo", "changed");
        assert_eq!(attrs.to_html(), r#"foo="changed" baz="qux""#);
        assert!(attrs.contains_key("baz"));
        assert!(!attrs.contains_key("title"));
    }

    #[test]
    fn test_server_vars_from_headers() {
        let vars = ServerVars::from_headers([
            ("X-Forwarded-For", "8.8.8.8"),
            ("User-Agent", "curl/8.0"),
            ("Content-Type", "text/html"),
        ]);
        assert_eq!(vars.get("HTTP_X_FORWARDED_FOR"), Some("8.8.8.8"));
        assert_eq!(vars.get("HTTP_USER_AGENT"), Some("curl/8.0"));
        assert_eq!(vars.get("CONTENT_TYPE"), Some("text/html"));
    }

    #[test]
    fn test_target_url_appends_get_data() {
        let request = FetchRequest::get("http://example.com/search")
            .with_form([("q", "rust lang"), ("page", "2")]);
        assert_eq!(
            request.target_url(),
            "http://example.com/search?q=rust+lang&page=2"
        );

        let request = FetchRequest::get("http://example.com/?a=1").with_body("b=2");
        assert_eq!(request.target_url(), "http://example.com/?a=1&b=2");

        let request = FetchRequest::post("http://example.com/").with_body("b=2");
        assert_eq!(request.target_url(), "http://example.com/");
    }

    #[test]
    fn test_transfer_info_status_classes() {
        let info = |status| TransferInfo {
            url: "http://example.com".to_string(),
            status,
            content_type: None,
            headers: BTreeMap::new(),
            total_time: Duration::ZERO,
        };
        assert!(info(200).is_success());
        assert!(info(204).is_success());
        assert!(!info(301).is_success());
        assert!(info(301).is_redirect());
        assert!(!info(404).is_success());
        assert!(!info(503).is_redirect());
    }

    #[test]
    fn test_browser_info_display() {
        let info = BrowserInfo {
            name: "Apple Safari".to_string(),
            version: "4.0.5".to_string(),
            platform: "Mac OS".to_string(),
        };
        assert_eq!(info.to_string(), "Apple Safari, Version: 4.0.5, Mac OS");
    }
}
