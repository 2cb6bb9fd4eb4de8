//! Introspection of the request being served, read from CGI-style server
//! variables.

use crate::core::user_agent;
use crate::domain::model::BrowserInfo;
use crate::domain::ports::RequestContext;
use std::net::Ipv4Addr;

/// Variables searched by [`client_ip`], most specific first.
const CLIENT_IP_KEYS: [&str; 7] = [
    "HTTP_CLIENT_IP",
    "HTTP_X_FORWARDED_FOR",
    "HTTP_X_FORWARDED",
    "HTTP_X_CLUSTER_CLIENT_IP",
    "HTTP_FORWARDED_FOR",
    "HTTP_FORWARDED",
    "REMOTE_ADDR",
];

pub fn is_https(ctx: &impl RequestContext) -> bool {
    ctx.non_empty_var("HTTPS").is_some_and(|v| v != "off")
}

pub fn is_ajax(ctx: &impl RequestContext) -> bool {
    ctx.var("HTTP_X_REQUESTED_WITH")
        .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
}

/// Rebuilds the URL of the current request, credentials included.
pub fn current_url(ctx: &impl RequestContext) -> String {
    let mut url = String::from(if is_https(ctx) { "https://" } else { "http://" });

    if let Some(user) = ctx.var("PHP_AUTH_USER") {
        url.push_str(user);
        if let Some(password) = ctx.var("PHP_AUTH_PW") {
            url.push(':');
            url.push_str(password);
        }
        url.push('@');
    }

    if let Some(host) = ctx.var("HTTP_HOST") {
        url.push_str(host);
    }

    if let Some(port) = ctx.var("SERVER_PORT").filter(|p| p.trim() != "80") {
        url.push(':');
        url.push_str(port);
    }

    match ctx.var("REQUEST_URI") {
        Some(uri) => url.push_str(uri),
        None => {
            if let Some(script) = ctx.var("PHP_SELF") {
                url.push_str(script.get(1..).unwrap_or_default());
            }
            if let Some(query) = ctx.var("QUERY_STRING") {
                url.push('?');
                url.push_str(query);
            }
        }
    }

    url
}

fn is_public_ipv4(addr: &Ipv4Addr) -> bool {
    let first = addr.octets()[0];
    !(addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_unspecified()
        || first == 0
        || first >= 240)
}

/// Client address. With `header`, that variable's trimmed value; otherwise
/// the first public IPv4 address found in the usual proxy variables.
pub fn client_ip(ctx: &impl RequestContext, header: Option<&str>) -> Option<String> {
    if let Some(header) = header.filter(|h| !h.is_empty()) {
        return ctx.var(header).map(|v| v.trim().to_string());
    }

    CLIENT_IP_KEYS
        .iter()
        .filter_map(|key| ctx.var(key))
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .find(|candidate| {
            candidate
                .parse::<Ipv4Addr>()
                .is_ok_and(|addr| is_public_ipv4(&addr))
        })
        .map(str::to_string)
}

pub fn referer(ctx: &impl RequestContext) -> Option<String> {
    ctx.var("HTTP_REFERER").map(str::to_string)
}

pub fn user_agent_header(ctx: &impl RequestContext) -> &str {
    ctx.var("HTTP_USER_AGENT").unwrap_or_default()
}

pub fn is_mobile(ctx: &impl RequestContext) -> bool {
    user_agent::is_mobile(user_agent_header(ctx))
}

pub fn browser(ctx: &impl RequestContext) -> BrowserInfo {
    user_agent::browser(user_agent_header(ctx))
}

pub fn accepts_gzip(ctx: &impl RequestContext) -> bool {
    ctx.non_empty_var("HTTP_ACCEPT_ENCODING")
        .is_some_and(|v| v.contains("gzip"))
}
