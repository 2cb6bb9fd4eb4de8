use crate::core::html::html_escape;
use regex::{Captures, Regex};
use std::fmt::Debug;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<string>"(?:[^"\\]|\\.)*")|(?P<bool>\b(?:true|false)\b)|(?P<number>-?\b\d+(?:\.\d+)?\b)"#)
        .expect("valid debug token pattern")
});

const PRE_STYLE: &str = "background-color: #CDDCF4;border: 1px solid #bbb;border-radius: 4px;font-size:12px;line-height:1.4em;margin:30px;padding:7px";
const HEADER_STYLE: &str =
    "border-bottom:1px solid #bbb;font-weight:bold;margin:0 0 10px 0;padding:3px 0 10px 0";

fn colour(caps: &Captures) -> String {
    let (colour, token) = if let Some(m) = caps.name("string") {
        ("#6B6E6E", m.as_str())
    } else if let Some(m) = caps.name("bool") {
        ("#0000FF", m.as_str())
    } else {
        ("#1287DB", &caps[0])
    };
    format!(r#"<span style="color: {};">{}</span>"#, colour, html_escape(token))
}

fn highlight(dump: &str) -> String {
    let mut out = String::with_capacity(dump.len() * 2);
    let mut last = 0;
    for caps in TOKEN.captures_iter(dump) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&html_escape(&dump[last..whole.start()]));
        out.push_str(&colour(&caps));
        last = whole.end();
    }
    out.push_str(&html_escape(&dump[last..]));
    out
}

/// Pretty-printed dump of `value` as a styled HTML block. `origin`, usually
/// a file or function name, becomes a heading.
pub fn debug<T: Debug + ?Sized>(value: &T, origin: Option<&str>) -> String {
    let header = origin
        .filter(|o| !o.is_empty())
        .map(|o| format!(r#"<h4 style="{}">{}</h4>"#, HEADER_STYLE, html_escape(o)))
        .unwrap_or_default();

    format!(
        r#"<pre style="{}">{}{}</pre>"#,
        PRE_STYLE,
        header,
        highlight(&format!("{:#?}", value))
    )
}

pub fn pr<T: Debug + ?Sized>(value: &T) -> String {
    format!("<pre>{}</pre>", html_escape(&format!("{:#?}", value)))
}
