use crate::domain::model::BrowserInfo;
use regex::Regex;
use std::sync::LazyLock;

static MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(android|bb\d+|meego).+mobile|avantgo|bada/|blackberry|blazer|compal|elaine|fennec|hiptop",
        r"|iemobile|ip(hone|od)|iris|kindle|lge |maemo|midp|mmp|mobile.+firefox|netfront|opera m(ob|in)i",
        r"|palm( os)?|phone|p(ixi|re)/|plucker|pocket|psp|series(4|6)0|symbian|treo|up\.(browser|link)",
        r"|vodafone|wap|windows ce|xda|xiino",
    ))
    .expect("valid mobile agent pattern")
});

static MOBILE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)1207|6310|6590|3gso|4thp|50[1-6]i|770s|802s|a wa|abac|ac(er|oo|s-)|ai(ko|rn)|al(av|ca|co)",
        r"|amoi|an(ex|ny|yw)|aptu|ar(ch|go)|as(te|us)|attw|au(di|-m|r |s )|avan|be(ck|ll|nq)|bi",
        r"(lb|rd)|bl(ac|az)|br(e|v)w|bumb|bw-(n|u)|c55/|capi|ccwa|cdm-|cell|chtm|cldc|cmd-|co",
        r"(mp|nd)|craw|da(it|ll|ng)|dbte|dc-s|devi|dica|dmob|do(c|p)o|ds(12|-d)|el(49|ai)|em(l2|ul)",
        r"|er(ic|k0)|esl8|ez([4-7]0|os|wa|ze)|fetc|fly(-|_)|g1 u|g560|gene|gf-5|g-mo|go(\.w|od)|gr(ad|un)|",
        r"haie|hcit|hd-(m|p|t)|hei-|hi(pt|ta)|hp( i|ip)|hs-c|ht(c(-| |_|a|g|p|s|t)|tp)|hu(aw|tc)|",
        r"i-(20|go|ma)|i230|iac( |-|/)|ibro|idea|ig01|ikom|im1k|inno|ipaq|iris|ja(t|v)a|jbro|jemu|jigs|",
        r"kddi|keji|kgt( |/)|klon|kpt |kwc-|kyo(c|k)|le(no|xi)|lg( g|/(k|l|u)|50|54|-[a-w])|libw|lynx|",
        r"m1-w|m3ga|m50/|ma(te|ui|xo)|mc(01|21|ca)|m-cr|me(rc|ri)|mi(o8|oa|ts)|mmef|mo(01|02|bi|de|do|",
        r"t(-| |o|v)|zz)|mt(50|p1|v )|mwbp|mywa|n10[0-2]|n20[2-3]|n30(0|2)|n50(0|2|5)|n7(0(0|1)|10)|ne((c|m)",
        r"-|on|tf|wf|wg|wt)|nok(6|i)|nzph|o2im|op(ti|wv)|oran|owg1|p800|pan(a|d|t)|pdxg|pg(13|-([1-8]|c))|",
        r"phil|pire|pl(ay|uc)|pn-2|po(ck|rt|se)|prox|psio|pt-g|qa-a|qc(07|12|21|32|60|-[2-7]|i-)|qtek|",
        r"r380|r600|raks|rim9|ro(ve|zo)|s55/|sa(ge|ma|mm|ms|ny|va)|sc(01|h-|oo|p-)|sdk/|se(c(-|0|1)|47|",
        r"mc|nd|ri)|sgh-|shar|sie(-|m)|sk-0|sl(45|id)|sm(al|ar|b3|it|t5)|so(ft|ny)|sp(01|h-|v-|v )|sy",
        r"(01|mb)|t2(18|50)|t6(00|10|18)|ta(gt|lk)|tcl-|tdg-|tel(i|m)|tim-|t-mo|to(pl|sh)|ts(70|m-|m3|m5)",
        r"|tx-9|up(\.b|g1|si)|utst|v400|v750|veri|vi(rg|te)|vk(40|5[0-3]|-v)|vm40|voda|vulc|vx(52|53|60|61|",
        r"70|80|81|83|85|98)|w3c(-| )|webc|whit|wi(g |nc|nw)|wmlb|wonu|x700|yas-|your|zeto|zte-",
    ))
    .expect("valid mobile prefix pattern")
});

static LINUX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)linux").expect("valid pattern"));
static MAC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)macintosh|mac os x").expect("valid pattern"));
static WINDOWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)windows|win32").expect("valid pattern"));

/// Browsers in detection order: (pattern, display name, version token).
const BROWSERS: [(&str, &str, &str); 5] = [
    ("firefox", "Mozilla Firefox", "Firefox"),
    ("chrome", "Google Chrome", "Chrome"),
    ("safari", "Apple Safari", "Safari"),
    ("opera", "Opera", "Opera"),
    ("netscape", "Netscape", "Netscape"),
];

const UNKNOWN: &str = "Unknown";

pub fn is_mobile(user_agent: &str) -> bool {
    let prefix: String = user_agent.chars().take(4).collect();
    MOBILE_AGENT.is_match(user_agent) || MOBILE_PREFIX.is_match(&prefix)
}

fn platform(user_agent: &str) -> &'static str {
    if LINUX.is_match(user_agent) {
        "Linux"
    } else if MAC.is_match(user_agent) {
        "Mac OS"
    } else if WINDOWS.is_match(user_agent) {
        "Windows"
    } else {
        UNKNOWN
    }
}

fn browser_name(user_agent: &str) -> (&'static str, &'static str) {
    let lowered = user_agent.to_lowercase();
    if lowered.contains("msie") && !lowered.contains("opera") {
        return ("Internet Explorer", "MSIE");
    }
    BROWSERS
        .iter()
        .find(|(needle, _, _)| lowered.contains(needle))
        .map(|(_, name, token)| (*name, *token))
        .unwrap_or((UNKNOWN, UNKNOWN))
}

fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_lowercase().rfind(&needle.to_lowercase())
}

/// Name, version and platform guessed from a `User-Agent` header.
pub fn browser(user_agent: &str) -> BrowserInfo {
    let (name, token) = browser_name(user_agent);

    let pattern = format!(
        r"(?P<browser>Version|{}|other)[/ ]+(?P<version>[0-9.|a-zA-Z.]*)",
        regex::escape(token)
    );
    let versions: Vec<&str> = match Regex::new(&pattern) {
        Ok(re) => re
            .captures_iter(user_agent)
            .filter_map(|caps| caps.name("version").map(|m| m.as_str()))
            .collect(),
        Err(_) => Vec::new(),
    };

    // With several tokens, prefer the second when `Version` comes last.
    let mut version = versions.first().copied();
    if versions.len() > 1
        && rfind_ignore_case(user_agent, "Version") >= rfind_ignore_case(user_agent, token)
    {
        version = versions.get(1).copied();
    }

    BrowserInfo {
        name: name.to_string(),
        version: version
            .filter(|v| !v.is_empty())
            .unwrap_or("?")
            .to_string(),
        platform: platform(user_agent).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; U; CPU iPhone OS 4_0 like Mac OS X; en-us) AppleWebKit/532.9 (KHTML, like Gecko) Version/4.0.5 Mobile/8A293 Safari/6531.22.7";
    const CHROME_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_WINDOWS: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const IE8: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";

    #[test]
    fn test_is_mobile() {
        assert!(is_mobile(IPHONE));
        assert!(is_mobile("Nokia6310i/1.0"));
        assert!(is_mobile("sony-ericsson"));
        assert!(!is_mobile(CHROME_LINUX));
        assert!(!is_mobile(FIREFOX_WINDOWS));
    }

    #[test]
    fn test_browser_iphone_safari() {
        let info = browser(IPHONE);
        assert_eq!(info.to_string(), "Apple Safari, Version: 4.0.5, Mac OS");
    }

    #[test]
    fn test_browser_desktop() {
        let info = browser(CHROME_LINUX);
        assert_eq!(info.name, "Google Chrome");
        assert_eq!(info.version, "120.0.0.0");
        assert_eq!(info.platform, "Linux");

        let info = browser(FIREFOX_WINDOWS);
        assert_eq!(info.name, "Mozilla Firefox");
        assert_eq!(info.version, "121.0");
        assert_eq!(info.platform, "Windows");

        let info = browser(IE8);
        assert_eq!(info.name, "Internet Explorer");
        assert_eq!(info.version, "8.0");
    }

    #[test]
    fn test_browser_unknown() {
        let info = browser("curl/8.4.0");
        assert_eq!(info.to_string(), "Unknown, Version: ?, Unknown");
    }
}
