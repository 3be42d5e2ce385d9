//! Domain cleaning for brand lookups.
//!
//! The cleaned domain is the lookup and cache key for brand data and the
//! source of the fallback display name.

use std::sync::LazyLock;

use regex::Regex;

/// Any run of leading whitespace, `http://`/`https://` and `www.` prefixes.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\s*(?:https?://|www\.))*\s*").expect("valid prefix regex")
});

/// Reduces user input such as `"  HTTPS://WWW.Foo.COM/bar  "` to `"foo.com"`.
///
/// Strips every leading scheme and `www.` prefix along with surrounding
/// whitespace, keeps everything before the first `/`, and lowercases.
/// Idempotent: no prefix survives a single pass. Returns an empty string
/// when nothing usable remains.
#[must_use]
pub fn clean_domain(raw: &str) -> String {
    let without_prefix = PREFIX_RE.replace(raw, "");
    without_prefix
        .split('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Human-facing name derived from a clean domain: `"stripe.com"` → `"Stripe"`.
#[must_use]
pub fn display_name_from_domain(domain: &str) -> String {
    let label = domain.split('.').next().unwrap_or_default();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_domain_strips_scheme_www_and_path() {
        assert_eq!(clean_domain("https://www.Example.com/path"), "example.com");
    }

    #[test]
    fn clean_domain_handles_padding_and_uppercase_scheme() {
        assert_eq!(clean_domain("  HTTPS://WWW.Foo.COM/bar  "), "foo.com");
    }

    #[test]
    fn clean_domain_is_idempotent() {
        for raw in [
            "example.com",
            "http://www.acme.io/a/b",
            "  Stripe.com ",
            "",
            "www.www.foo.com",
            "https:// www.foo.com",
            "HTTP://WWW.www.Foo.com/x",
            "www. www.foo.com",
            "https://https://foo.com",
        ] {
            let once = clean_domain(raw);
            assert_eq!(clean_domain(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn clean_domain_strips_repeated_prefixes() {
        assert_eq!(clean_domain("www.www.foo.com"), "foo.com");
        assert_eq!(clean_domain("https:// www.foo.com"), "foo.com");
        assert_eq!(clean_domain("HTTP://WWW.www.Foo.com/x"), "foo.com");
    }

    #[test]
    fn clean_domain_keeps_subdomains_other_than_www() {
        assert_eq!(clean_domain("http://blog.example.com"), "blog.example.com");
    }

    #[test]
    fn clean_domain_only_strips_leading_www() {
        assert_eq!(clean_domain("notwww.example.com"), "notwww.example.com");
    }

    #[test]
    fn clean_domain_of_bare_scheme_is_empty() {
        assert_eq!(clean_domain("https://"), "");
        assert_eq!(clean_domain("   "), "");
    }

    #[test]
    fn display_name_capitalizes_first_label() {
        assert_eq!(display_name_from_domain("stripe.com"), "Stripe");
        assert_eq!(display_name_from_domain("acme"), "Acme");
        assert_eq!(display_name_from_domain(""), "");
    }
}
