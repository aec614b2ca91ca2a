//! Cleanup of icon and link URLs.
//!
//! Configuration files are hand edited and often pasted from a browser, so
//! a handful of recurring mistakes are repaired before a value is stored:
//!
//! - surrounding whitespace is trimmed
//! - a doubled scheme letter (`hhttps://`) is collapsed to `https://`
//! - protocol-relative URLs (`//host/path`) get an `https:` scheme
//! - the `flaticon.png` host typo is corrected to `flaticon.com`
//!
//! [`normalize_url`] is idempotent.

use std::borrow::Cow;

const FLATICON_TYPO: &str = "flaticon.png";
const FLATICON_HOST: &str = "flaticon.com";

/// Normalize an icon or link URL.
///
/// ```rust
/// use biolink_core::normalize_url;
///
/// assert_eq!(normalize_url("//a.com/x.png"), "https://a.com/x.png");
/// assert_eq!(normalize_url(" hhttps://a.com "), "https://a.com");
/// assert_eq!(
///     normalize_url("https://cdn-icons-png.flaticon.png/512/x.png"),
///     "https://cdn-icons-png.flaticon.com/512/x.png"
/// );
/// ```
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut url: Cow<'_, str> = Cow::Borrowed(trimmed);

    if let Some(fixed) = collapse_doubled_scheme(&url) {
        url = Cow::Owned(fixed);
    }

    if url.starts_with("//") {
        url = Cow::Owned(format!("https:{}", url));
    }

    if let Some((start, end)) = host_range(&url) {
        if url[start..end].contains(FLATICON_TYPO) {
            let host = url[start..end].replace(FLATICON_TYPO, FLATICON_HOST);
            url = Cow::Owned(format!("{}{}{}", &url[..start], host, &url[end..]));
        }
    }

    url.into_owned()
}

/// `hhttps://` / `HHttp://` → `https://` / `http://`.
fn collapse_doubled_scheme(url: &str) -> Option<String> {
    let extra = url.bytes().take_while(|b| b.eq_ignore_ascii_case(&b'h')).count();
    if extra < 2 {
        return None;
    }
    let rest = &url[extra..];
    if let Some(tail) = strip_prefix_ignore_case(rest, "ttps://") {
        Some(format!("https://{}", tail))
    } else {
        strip_prefix_ignore_case(rest, "ttp://").map(|tail| format!("http://{}", tail))
    }
}

/// Byte range of the host segment, if the value has one.
///
/// The host follows a leading `scheme://`. A value with no `:` before its
/// first `/`, `?` or `#` is read as `host/path`. Anything else, such as
/// `mailto:` or `tel:`, has no host.
fn host_range(url: &str) -> Option<(usize, usize)> {
    let boundary = url.find(['/', '?', '#']).unwrap_or(url.len());
    let start = match url[..boundary].find(':') {
        Some(colon) => {
            if !is_scheme(&url[..colon]) || !url[colon..].starts_with("://") {
                return None;
            }
            colon + 3
        }
        None => 0,
    };
    let end = url[start..]
        .find(['/', '?', '#'])
        .map_or(url.len(), |pos| start + pos);
    (start < end).then_some((start, end))
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// If `line` is nothing but a URL (optionally behind a list bullet),
/// return the URL text.
pub(crate) fn bare_url(line: &str) -> Option<&str> {
    let candidate = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
        .trim();

    if candidate.is_empty() || candidate.contains(char::is_whitespace) {
        return None;
    }

    let looks_like_url = ["http://", "https://", "//", "mailto:"]
        .iter()
        .any(|prefix| strip_prefix_ignore_case(candidate, prefix).is_some())
        || collapse_doubled_scheme(candidate).is_some();

    looks_like_url.then_some(candidate)
}

/// Display label for a URL: its host without a leading `www.`.
///
/// `mailto:` addresses use the mail domain. Returns `None` when no host
/// can be found.
///
/// ```rust
/// use biolink_core::url::host_label;
///
/// assert_eq!(host_label("https://www.example.com/about").as_deref(), Some("example.com"));
/// assert_eq!(host_label("mailto:jane@example.org").as_deref(), Some("example.org"));
/// assert_eq!(host_label("not a url"), None);
/// ```
pub fn host_label(url: &str) -> Option<String> {
    let url = url.trim();
    let authority = if let Some(address) = strip_prefix_ignore_case(url, "mailto:") {
        address.rsplit_once('@')?.1
    } else {
        let (_, rest) = url.split_once("://")?;
        rest
    };

    let host = authority
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split(':').next().unwrap_or_default();
    let host = strip_prefix_ignore_case(host, "www.").unwrap_or(host);

    (!host.is_empty()).then(|| host.to_string())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(normalize_url("//a.com/x.png"), "https://a.com/x.png");
    }

    #[test]
    fn doubled_scheme_letters_collapse() {
        assert_eq!(normalize_url("hhttps://a.com"), "https://a.com");
        assert_eq!(normalize_url("hhhttp://a.com"), "http://a.com");
        assert_eq!(normalize_url("hhello"), "hhello");
        assert_eq!(normalize_url("hhttps.example.com"), "hhttps.example.com");
    }

    #[test]
    fn doubled_scheme_collapses_in_any_case() {
        assert_eq!(normalize_url("HHTTPS://a.com/X"), "https://a.com/X");
        assert_eq!(normalize_url("HhTtP://a.com"), "http://a.com");
        assert_eq!(normalize_url(&normalize_url("HHTTPS://a.com")), "https://a.com");
    }

    #[test]
    fn flaticon_typo_only_in_host() {
        assert_eq!(
            normalize_url("https://cdn-icons-png.flaticon.png/512/flaticon.png"),
            "https://cdn-icons-png.flaticon.com/512/flaticon.png"
        );
        assert_eq!(
            normalize_url("//cdn-icons-png.flaticon.png/512/1.png"),
            "https://cdn-icons-png.flaticon.com/512/1.png"
        );
        assert_eq!(
            normalize_url("cdn-icons-png.flaticon.png/512/x.png"),
            "cdn-icons-png.flaticon.com/512/x.png"
        );
    }

    #[test]
    fn flaticon_typo_in_query_is_untouched() {
        assert_eq!(
            normalize_url("cdn-icons-png.flaticon.png/512/x.png?next=https://flaticon.png/y"),
            "cdn-icons-png.flaticon.com/512/x.png?next=https://flaticon.png/y"
        );
        assert_eq!(
            normalize_url("https://a.com/x?next=https://cdn.flaticon.png/y"),
            "https://a.com/x?next=https://cdn.flaticon.png/y"
        );
    }

    #[test]
    fn mailto_is_left_alone() {
        assert_eq!(normalize_url(" mailto:a@flaticon.png "), "mailto:a@flaticon.png");
        assert_eq!(
            normalize_url("mailto:a@b.com?body=https://cdn.flaticon.png/x"),
            "mailto:a@b.com?body=https://cdn.flaticon.png/x"
        );
        assert_eq!(
            normalize_url("tel:+1-flaticon.png://x"),
            "tel:+1-flaticon.png://x"
        );
    }

    #[test]
    fn host_range_requires_leading_scheme() {
        assert_eq!(host_range("https://a.com/x"), Some((8, 13)));
        assert_eq!(host_range("a.com/x?u=https://b.com"), Some((0, 5)));
        assert_eq!(host_range("mailto:a@b.com?u=https://c.com"), None);
        assert_eq!(host_range("a b://c.com"), None);
        assert_eq!(host_range("a.com:8080/x"), None);
        assert_eq!(host_range("https:///x"), None);
    }

    #[test]
    fn empty_and_blank_stay_empty() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   \t"), "");
    }

    #[test]
    fn bare_url_detection() {
        assert_eq!(bare_url("https://a.com"), Some("https://a.com"));
        assert_eq!(bare_url("- //a.com/x"), Some("//a.com/x"));
        assert_eq!(bare_url("HTTPS://A.COM"), Some("HTTPS://A.COM"));
        assert_eq!(bare_url("hhttps://a.com"), Some("hhttps://a.com"));
        assert_eq!(bare_url("HHTTPS://a.com"), Some("HHTTPS://a.com"));
        assert_eq!(bare_url("mailto:jane@x.io"), Some("mailto:jane@x.io"));
        assert_eq!(bare_url("URL: https://a.com"), None);
        assert_eq!(bare_url("see https://a.com"), None);
        assert_eq!(bare_url("- **Name**:"), None);
    }

    #[test]
    fn host_label_strips_www_port_and_userinfo() {
        assert_eq!(
            host_label("https://user:pw@WWW.Example.com:8080/x?q#f").as_deref(),
            Some("Example.com")
        );
        assert_eq!(host_label("https://").as_deref(), None);
    }
}
