use rand::Rng;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static TRAILING_PARTIAL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+?(\S+)?$").expect("valid word pattern"));

static AFTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[^\S ]+").expect("valid minify pattern"));
static BEFORE_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S ]+<").expect("valid minify pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s)+").expect("valid minify pattern"));

const ELLIPSIS: &str = "...";

const PASSWORD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuwxyzABCDEFGHIJKLMNOPQRSTUWXYZ0123456789";

/// Truncates to `max_length` characters.
///
/// With `add_ellipsis` the `...` counts toward the limit. With `word_safe` a
/// word cut in the middle is dropped along with the whitespace before it.
pub fn shorten_string(text: &str, max_length: usize, add_ellipsis: bool, word_safe: bool) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let mut keep = max_length;
    let mut ellipsis = "";
    if add_ellipsis {
        let reserved = ELLIPSIS.len().min(max_length);
        ellipsis = &ELLIPSIS[..reserved];
        keep -= reserved;
    }

    let mut shortened: String = text.chars().take(keep).collect();

    if word_safe {
        shortened = TRAILING_PARTIAL_WORD.replace(&shortened, "").into_owned();
    }

    shortened.push_str(ellipsis);
    shortened
}

pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            ' ' | '"' | '\'' | '&' | '/' | '\\' | '?' | '#' => '_',
            other => other,
        })
        .collect()
}

pub fn file_extension(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|ext| ext.to_str())
}

pub fn generate_random_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| PASSWORD_ALPHABET[rng.random_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

/// Drops whitespace hugging tags (plain spaces survive) and collapses every
/// other whitespace run to its first character.
pub fn minify_html(buffer: &str) -> String {
    let buffer = AFTER_TAG_WHITESPACE.replace_all(buffer, ">");
    let buffer = BEFORE_TAG_WHITESPACE.replace_all(&buffer, "<");
    WHITESPACE_RUN.replace_all(&buffer, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_shorten_string() {
        assert_eq!(shorten_string(FOX, 20, true, false), "The quick brown f...");
        assert_eq!(shorten_string(FOX, 20, false, false), "The quick brown fox ");
        assert_eq!(shorten_string(FOX, 20, false, true), "The quick brown fox");
        assert_eq!(shorten_string(FOX, 18, true, true), "The quick...");
        assert_eq!(shorten_string(FOX, 100, true, false), FOX);
        assert_eq!(shorten_string(FOX, 2, true, false), "..");
        assert_eq!(shorten_string("héllo wörld", 8, true, false), "héllo...");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(
            sanitize_file_name("my \"report\" & co/v1?#.pdf"),
            "my__report____co_v1__.pdf"
        );
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("/tmp/archive/recipe.php"), Some("php"));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension("Makefile"), None);
    }

    #[test]
    fn test_generate_random_password() {
        let password = generate_random_password(10);
        assert_eq!(password.len(), 10);
        assert!(password.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
        assert!(generate_random_password(0).is_empty());
    }

    #[test]
    fn test_minify_html() {
        let html = "<div>\n    <p>Hello   world</p>\n</div>\n";
        assert_eq!(minify_html(html), "<div> <p>Hello world</p></div>");
    }
}
