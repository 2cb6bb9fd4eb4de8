use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    ))
    .expect("valid email pattern")
});

const MAX_LOCAL_PART: usize = 64;
const MAX_DOMAIN: usize = 253;

/// Syntax-only check. The domain needs at least two labels, so `user@domain`
/// is rejected.
pub fn is_valid_email_syntax(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_PART && domain.len() <= MAX_DOMAIN && EMAIL_PATTERN.is_match(address)
}

pub fn email_domain(address: &str) -> Option<&str> {
    address
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}

/// True for absolute URLs. Schemes other than `mailto`, `news` and `file`
/// must carry a host.
pub fn validate_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "mailto" | "news" | "file" => true,
            _ => parsed.host_str().is_some_and(|host| !host.is_empty()),
        },
        Err(_) => false,
    }
}

/// Disposable-mail domains, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct BannedDomains {
    domains: HashSet<String>,
}

impl BannedDomains {
    pub fn builtin() -> Self {
        let mut banned = Self::default();
        banned.extend_from_list(include_str!("banned_domains.txt"));
        banned
    }

    /// One domain per line; blank lines and `#` comments are skipped.
    pub fn extend_from_list(&mut self, list: &str) {
        self.extend(
            list.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
    }

    pub fn extend<I, S>(&mut self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains
            .extend(domains.into_iter().map(|d| d.as_ref().trim().to_lowercase()));
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&domain.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
