//! oEmbed expansion of bare media links.

use crate::app::successful_contents;
use crate::core::html::{html_escape, link_tag};
use crate::core::urlencode;
use crate::domain::model::Attributes;
use crate::domain::ports::Fetcher;
use crate::utils::error::{RecipeError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const DEFAULT_WIDTH: u32 = 560;
pub const DEFAULT_HEIGHT: u32 = 315;

/// A link not already inside a quoted attribute. Group 2 is the URL; the
/// whole match, leading character included, is what gets replaced.
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(^|[^"|^'])(https?://?([-\w]+\.[-\w.]+)+\w(:\d+)?(/([-\w/_.]*(\?\S+)?)?)*)"#)
        .expect("valid bare url pattern")
});

const YOUTUBE: &str = "YouTube";

/// (name, url pattern, oEmbed endpoint). `{format}` in an endpoint becomes
/// `json`.
const PROVIDERS: [(&str, &str, &str); 13] = [
    (
        YOUTUBE,
        r"(?ix)https?://(?:[0-9A-Z-]+\.)?(?:youtu\.be/|youtube(?:-nocookie)?\.com\S*[^\w\s-])([\w-]{11})(?:[^\w-]|$)[?=&+%\w.-]*",
        "http://www.youtube.com/oembed",
    ),
    ("blip.tv", r"(?i)https?://blip\.tv/(.+)", "http://blip.tv/oembed/"),
    (
        "Vimeo",
        r"(?ix)https?://(?:[0-9A-Z-]+\.)?(?:vimeo.com\S*[^\w\s-])([\w-]{1,20})(?:[^\w-]|$)[?=&+%\w.-]*",
        "http://vimeo.com/api/oembed.{format}",
    ),
    (
        "Dailymotion",
        r"(?i)https?://(www\.)?dailymotion\.com/.*",
        "http://www.dailymotion.com/services/oembed",
    ),
    (
        "Flickr",
        r"(?i)https?://(www\.)?flickr\.com/.*",
        "http://www.flickr.com/services/oembed/",
    ),
    (
        "SmugMug",
        r"(?i)https?://(.+\.)?smugmug\.com/.*",
        "http://api.smugmug.com/services/oembed/",
    ),
    (
        "Hulu",
        r"(?i)https?://(www\.)?hulu\.com/watch/.*",
        "http://www.hulu.com/api/oembed.{format}",
    ),
    ("Revision3", r"(?i)https?://revision3\.com/(.+)", "http://revision3.com/api/oembed/"),
    ("WordPress.tv", r"(?i)https?://wordpress\.tv/(.+)", "http://wordpress.tv/oembed/"),
    (
        "FunnyOrDie",
        r"(?i)https?://(www\.)?funnyordie\.com/videos/.*",
        "http://www.funnyordie.com/oembed",
    ),
    (
        "SoundCloud",
        r"(?i)https?://(www\.)?soundcloud\.com/.*",
        "http://soundcloud.com/oembed",
    ),
    (
        "SlideShare",
        r"https?://(www\.)?slideshare.net/*",
        "http://www.slideshare.net/api/oembed/2",
    ),
    (
        "Instagram",
        r"(?i)http://instagr(\.am|am\.com)/p/.*",
        "http://api.instagram.com/oembed",
    ),
];

#[derive(Debug, Clone)]
pub struct EmbedProvider {
    pub name: String,
    pub pattern: Regex,
    pub endpoint: String,
}

impl EmbedProvider {
    pub fn new(name: impl Into<String>, pattern: &str, endpoint: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| RecipeError::ConfigError {
            message: format!("invalid embed pattern: {}", e),
        })?;
        Ok(Self {
            name: name.into(),
            pattern,
            endpoint: endpoint.into(),
        })
    }

    /// Known providers, in match priority order.
    pub fn defaults() -> Vec<EmbedProvider> {
        PROVIDERS
            .iter()
            .filter_map(|(name, pattern, endpoint)| EmbedProvider::new(*name, pattern, *endpoint).ok())
            .collect()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_url(&self, url: &str, width: u32, height: u32) -> String {
        let endpoint = self.endpoint.replace("{format}", "json");
        format!(
            "{}?url={}&maxwidth={}&maxheight={}&format=json",
            endpoint,
            urlencode(url),
            width,
            height
        )
    }
}

fn non_empty_str<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Numbers or numeric strings, rendered as given.
fn numeric(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() && s.parse::<f64>().is_ok() => Some(s.clone()),
        _ => None,
    }
}

/// HTML for an oEmbed response, `None` when the response is unusable.
fn render(url: &str, data: &Value) -> Option<String> {
    match data.get("type").and_then(Value::as_str)? {
        "photo" => {
            let src = non_empty_str(data, "url")?;
            let width = numeric(data, "width")?;
            let height = numeric(data, "height")?;
            let title = non_empty_str(data, "title").unwrap_or_default();
            Some(format!(
                r#"<a href="{}"><img src="{}" alt="{}" width="{}" height="{}" /></a>"#,
                url,
                html_escape(src),
                html_escape(title),
                html_escape(&width),
                html_escape(&height)
            ))
        }
        "video" | "rich" => non_empty_str(data, "html").map(str::to_string),
        "link" => non_empty_str(data, "title").map(|title| link_tag(url, title, &Attributes::new())),
        _ => None,
    }
}

async fn embed_one<F: Fetcher + ?Sized>(
    fetcher: &F,
    providers: &[EmbedProvider],
    url: &str,
    width: u32,
    height: u32,
) -> Option<String> {
    let url = url.split('#').next().unwrap_or(url);
    let provider = providers.iter().find(|p| p.pattern.is_match(url))?;

    let url = if provider.name == YOUTUBE {
        url.replace("www.youtu.be/", "www.youtube.com/watch?v=")
    } else {
        url.to_string()
    };

    let request_url = provider.request_url(&url, width, height);
    tracing::debug!("oEmbed lookup via {}: {}", provider.name, request_url);

    let body = successful_contents(fetcher, &request_url).await?;

    match serde_json::from_str::<Value>(&body) {
        Ok(data) => render(&url, &data),
        Err(e) => {
            tracing::warn!("{} returned invalid oEmbed JSON: {}", provider.name, e);
            None
        }
    }
}

/// Replaces each bare media link with its provider's embed HTML. Links
/// without a provider, and failed lookups, are left as they are.
pub async fn auto_embed<F: Fetcher + ?Sized>(
    fetcher: &F,
    providers: &[EmbedProvider],
    text: &str,
    width: u32,
    height: u32,
) -> String {
    let found: Vec<(usize, usize, &str)> = BARE_URL
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let url = caps.get(2)?;
            Some((whole.start(), whole.end(), url.as_str()))
        })
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (start, end, url) in found {
        out.push_str(&text[last..start]);
        match embed_one(fetcher, providers, url.trim(), width, height).await {
            Some(html) => out.push_str(&html),
            None => out.push_str(&text[start..end]),
        }
        last = end;
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_providers_compile() {
        let providers = EmbedProvider::defaults();
        assert_eq!(providers.len(), PROVIDERS.len());
        assert_eq!(providers[0].name, YOUTUBE);
    }

    #[test]
    fn test_provider_matching() {
        let providers = EmbedProvider::defaults();
        let find = |url: &str| {
            providers
                .iter()
                .find(|p| p.pattern.is_match(url))
                .map(|p| p.name.as_str())
        };

        assert_eq!(find("https://www.youtube.com/watch?v=bk6Xst6euQk"), Some(YOUTUBE));
        assert_eq!(find("https://youtu.be/bk6Xst6euQk"), Some(YOUTUBE));
        assert_eq!(find("https://vimeo.com/76979871"), Some("Vimeo"));
        assert_eq!(find("https://soundcloud.com/artist/track"), Some("SoundCloud"));
        assert_eq!(find("https://github.com/ngfw/Recipe"), None);
    }

    #[test]
    fn test_request_url() {
        let provider = EmbedProvider::new("Vimeo", "vimeo", "http://vimeo.com/api/oembed.{format}").unwrap();
        assert_eq!(
            provider.request_url("https://vimeo.com/1?a=b", 560, 315),
            "http://vimeo.com/api/oembed.json?url=https%3A%2F%2Fvimeo.com%2F1%3Fa%3Db&maxwidth=560&maxheight=315&format=json"
        );
    }

    #[test]
    fn test_render() {
        let url = "https://flickr.com/p/1";
        let photo = serde_json::json!({"type": "photo", "url": "https://img/1.jpg", "width": 640, "height": "480", "title": "A \"view\""});
        assert_eq!(
            render(url, &photo).unwrap(),
            r#"<a href="https://flickr.com/p/1"><img src="https://img/1.jpg" alt="A &quot;view&quot;" width="640" height="480" /></a>"#
        );

        let broken_photo = serde_json::json!({"type": "photo", "url": "https://img/1.jpg"});
        assert_eq!(render(url, &broken_photo), None);

        let video = serde_json::json!({"type": "video", "html": "<iframe></iframe>"});
        assert_eq!(render(url, &video).as_deref(), Some("<iframe></iframe>"));
        assert_eq!(render(url, &serde_json::json!({"type": "video"})), None);

        let link = serde_json::json!({"type": "link", "title": "Flickr"});
        assert_eq!(
            render(url, &link).unwrap(),
            r#"<a href="https://flickr.com/p/1" title="Flickr" >Flickr</a>"#
        );

        assert_eq!(render(url, &serde_json::json!({"type": "other"})), None);
    }
}
