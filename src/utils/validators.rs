//! Input validators for logins, passwords and image URLs.
//!
//! All functions are pure and return `bool`; callers decide which error to raise.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Minimum login length in characters.
pub const LOGIN_MIN_LEN: usize = 3;
/// Maximum login length in characters.
pub const LOGIN_MAX_LEN: usize = 50;
/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

static LOGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("login pattern compiles"));

/// Checks that a login is 3-50 characters of `[A-Za-z0-9_]`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_login("seller_01"));
/// assert!(!validate_login("ab"));
/// assert!(!validate_login("john.doe"));
/// ```
pub fn validate_login(login: &str) -> bool {
    let len = login.chars().count();
    (LOGIN_MIN_LEN..=LOGIN_MAX_LEN).contains(&len) && LOGIN_PATTERN.is_match(login)
}

/// Checks that a password has at least 6 characters, one letter and one ASCII digit.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(char::is_alphabetic)
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Checks that a non-empty string is an absolute `http`/`https` URL with a host.
///
/// The empty string is accepted: an absent image is always valid.
pub fn validate_url(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };

    // Url lowercases the scheme while parsing.
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_logins() {
        assert!(validate_login("abc"));
        assert!(validate_login("Seller_42"));
        assert!(validate_login(&"a".repeat(50)));
    }

    #[test]
    fn test_invalid_logins() {
        assert!(!validate_login(""));
        assert!(!validate_login("ab"));
        assert!(!validate_login(&"a".repeat(51)));
        assert!(!validate_login("john.doe"));
        assert!(!validate_login("john doe"));
        assert!(!validate_login("jöhn"));
        assert!(!validate_login("abc-def"));
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("abc123"));
        assert!(validate_password("Passw0rd!"));
    }

    #[test]
    fn test_weak_passwords() {
        assert!(!validate_password("ab1"));
        assert!(!validate_password("abcdefgh"));
        assert!(!validate_password("12345678"));
        assert!(!validate_password(""));
    }

    #[test]
    fn test_password_digit_must_be_ascii() {
        assert!(!validate_password("abcdefⅧ"));
        assert!(!validate_password("abcdef½"));
        assert!(!validate_password("abcdef٣"));
        assert!(validate_password("abcdef3"));
    }

    #[test]
    fn test_valid_urls() {
        assert!(validate_url(""));
        assert!(validate_url("https://example.com/image.png"));
        assert!(validate_url("http://cdn.example.com:8080/a/b.jpg?size=large"));
        assert!(validate_url("HTTPS://EXAMPLE.COM/x.png"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!validate_url("not a url"));
        assert!(!validate_url("/relative/path.png"));
        assert!(!validate_url("ftp://example.com/file.png"));
        assert!(!validate_url("javascript:alert(1)"));
        assert!(!validate_url("data:image/png;base64,AAAA"));
        assert!(!validate_url("file:///etc/passwd"));
    }
}
