//! HTML snippet builders. All output is returned as `String`; nothing is
//! printed.

use crate::core::urlencode;
use crate::core::validate::is_valid_email_syntax;
use crate::domain::model::Attributes;
use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static BARE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https?://([-\w\.]+[-\w])+(:\d+)?(/([\w/_\.#-]*(\?\S+)?[^\.\s])?)?)")
        .expect("valid url pattern")
});

pub fn attributes_to_string(attributes: &Attributes) -> String {
    attributes.to_html()
}

/// Escapes `& < > " '` the way HTML attribute and body text needs.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn strip_tags(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// `<img>` tag pointing at Google's favicon service for `url`.
pub fn favicon(url: &str, attributes: &Attributes) -> String {
    let attr = attributes.to_html();
    let attr = attr.trim();
    let attr = if attr.is_empty() {
        String::new()
    } else {
        format!(" {}", attr)
    };

    format!(
        "<img src=\"https://www.google.com/s2/favicons?domain={}\"{}/>",
        urlencode(url),
        attr
    )
}

pub const QR_DEFAULT_SIZE: u32 = 150;

/// `<img>` tag rendering `data` as a QR code through the Google chart API.
pub fn qr_code(data: &str, width: u32, height: u32, attributes: &Attributes, secure: bool) -> String {
    let scheme = if secure { "https" } else { "http" };
    let api_url = format!(
        "{}://chart.apis.google.com/chart?chs={}x{}&cht=qr&chl={}",
        scheme,
        width,
        height,
        urlencode(data)
    );

    format!("<img src=\"{}\" {} />", api_url, attributes.to_html().trim())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravatarOptions {
    /// Pixels, 1 to 2048.
    pub size: u32,
    /// Imageset for unknown addresses: 404, mm, identicon, monsterid, wavatar.
    pub default_image: String,
    /// Maximum rating, inclusive: g, pg, r, x.
    pub rating: String,
}

impl Default for GravatarOptions {
    fn default() -> Self {
        Self {
            size: 80,
            default_image: "mm".to_string(),
            rating: "g".to_string(),
        }
    }
}

pub fn gravatar_hash(email: &str) -> String {
    format!("{:x}", md5::compute(email.trim().to_lowercase()))
}

pub fn gravatar(email: &str, options: &GravatarOptions, attributes: &Attributes, secure: bool) -> String {
    let base = if secure {
        "https://secure.gravatar.com/"
    } else {
        "http://www.gravatar.com/"
    };

    format!(
        "<img src=\"{base}avatar.php?gravatar_id={id}&default={default}&size={size}&rating={rating}\" width=\"{size}px\" height=\"{size}px\" {attr} />",
        base = base,
        id = gravatar_hash(email),
        default = options.default_image,
        size = options.size,
        rating = options.rating,
        attr = attributes.to_html().trim(),
    )
}

/// Anchor tag for a URL or an email address (rendered as `mailto:`).
///
/// A non-empty `text` also becomes the `title` unless the caller supplied one.
/// An empty `text` shows the link itself.
pub fn link_tag(link: &str, text: &str, attributes: &Attributes) -> String {
    let mut tag = if is_valid_email_syntax(link) {
        format!("<a href=\"mailto:{}\"", link)
    } else {
        format!("<a href=\"{}\"", link)
    };

    if !attributes.contains_key("title") && !text.is_empty() {
        tag.push_str(&format!(
            " title=\"{}\" ",
            strip_tags(text).replace('"', "")
        ));
    }

    let text = if text.is_empty() { link } else { text };

    let attr = attributes.to_html();
    let attr = attr.trim();
    if !attr.is_empty() && !tag.ends_with(' ') {
        tag.push(' ');
    }
    tag.push_str(attr);
    tag.push('>');
    tag.push_str(&html_escape(text));
    tag.push_str("</a>");
    tag
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// Unknown names fall back to `Info`.
    pub fn parse(kind: &str) -> Self {
        match kind.to_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "warning" => NotificationKind::Warning,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }

    fn css(self) -> &'static str {
        match self {
            NotificationKind::Success => {
                "border-color: #bdf2a6;color: #2a760a;background-color: #eefde7;"
            }
            NotificationKind::Warning => {
                "border-color: #f2e5a6;color: #76640a;background-color: #fdf9e7;"
            }
            NotificationKind::Error => {
                "border-color: #f2a6a6;color: #760a0a;background-color: #fde7e7;"
            }
            NotificationKind::Info => {
                "border-color: #a6d9f2;color: #0a5276;background-color: #e7f6fd;"
            }
        }
    }
}

/// Styled `role="alert"` box; `None` for an empty message.
pub fn notification(message: &str, kind: NotificationKind, attributes: &Attributes) -> Option<String> {
    if message.is_empty() {
        return None;
    }

    Some(format!(
        "<div style=\"display: block;padding: 0.5em;border: solid 1px;border-radius: 0.125em;margin-bottom: 1em; {}\" {} role=\"alert\">{}</div>",
        kind.css(),
        attributes.to_html(),
        message
    ))
}

/// Wraps every bare http(s) URL in an anchor tag.
pub fn make_clickable_links(text: &str, attributes: &Attributes) -> String {
    let attr = attributes.to_html().replace('$', "$$");
    let replacement = format!("<a href=\"${{1}}\" {}>${{1}}</a>", attr);
    BARE_URL_PATTERN
        .replace_all(text, replacement.as_str())
        .into_owned()
}
