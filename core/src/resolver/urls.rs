#![deny(missing_docs)]

//! # URL Splitting
//!
//! Turns collection URLs (`{{baseUrl}}/users/:id?limit=5`) into OpenAPI path
//! templates (`/users/{id}`).

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Extracts the path portion of a raw URL.
///
/// Scheme, host, query string and fragment are dropped. The result always
/// starts with `/`; an empty URL yields `/`.
pub fn extract_path_from_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
    if without_query.is_empty() {
        return "/".to_string();
    }

    let path = match Url::parse(without_query) {
        Ok(parsed) if parsed.has_host() => percent_decode_str(parsed.path())
            .decode_utf8_lossy()
            .into_owned(),
        _ => strip_host(without_query).to_string(),
    };

    ensure_leading_slash(&path)
}

/// Rewrites `:name` placeholders to `{name}`.
pub fn normalize_path(path: &str) -> String {
    static COLON_RE: OnceLock<Regex> = OnceLock::new();
    let re = COLON_RE.get_or_init(|| Regex::new(r":(\w+)").expect("Invalid regex"));
    re.replace_all(path, "{${1}}").into_owned()
}

/// Returns `{name}` placeholder names in order of appearance.
pub fn extract_path_parameter_names(path: &str) -> Vec<String> {
    static BRACE_RE: OnceLock<Regex> = OnceLock::new();
    let re = BRACE_RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex"));
    re.captures_iter(path).map(|cap| cap[1].to_string()).collect()
}

/// Strips the host part of a URL that `url` cannot parse, such as one starting
/// with a `{{variable}}`.
fn strip_host(s: &str) -> &str {
    if let Some(idx) = s.find("://") {
        let rest = &s[idx + 3..];
        return rest.find('/').map_or("", |slash| &rest[slash..]);
    }
    if s.starts_with('/') {
        return s;
    }
    if s.starts_with("{{") {
        if let Some(end) = s.find("}}") {
            let rest = &s[end + 2..];
            return match rest.find('/') {
                Some(slash) => &rest[slash..],
                None => "",
            };
        }
    }
    let (first, rest) = match s.find('/') {
        Some(slash) => (&s[..slash], &s[slash..]),
        None => (s, ""),
    };
    if looks_like_host(first) {
        rest
    } else {
        s
    }
}

fn looks_like_host(segment: &str) -> bool {
    segment == "localhost"
        || segment.starts_with("localhost:")
        || (segment.contains('.') && !segment.starts_with('.'))
        || segment.rsplit_once(':').is_some_and(|(host, port)| {
            !host.is_empty() && !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
        })
}

fn ensure_leading_slash(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            extract_path_from_url("https://api.example.com/v1/users/:id?limit=5"),
            "/v1/users/:id"
        );
        assert_eq!(extract_path_from_url("http://localhost:8080"), "/");
    }

    #[test]
    fn test_absolute_url_keeps_braces() {
        assert_eq!(
            extract_path_from_url("https://api.example.com/users/{id}"),
            "/users/{id}"
        );
    }

    #[test]
    fn test_variable_host() {
        assert_eq!(extract_path_from_url("{{baseUrl}}/users/:id"), "/users/:id");
        assert_eq!(extract_path_from_url("{{baseUrl}}"), "/");
        assert_eq!(
            extract_path_from_url("{{scheme}}://{{host}}/orders#frag"),
            "/orders"
        );
    }

    #[test]
    fn test_bare_host_and_relative() {
        assert_eq!(extract_path_from_url("api.example.com/pets"), "/pets");
        assert_eq!(extract_path_from_url("localhost:3000/pets"), "/pets");
        assert_eq!(extract_path_from_url("/pets"), "/pets");
        assert_eq!(extract_path_from_url("pets/1"), "/pets/1");
        assert_eq!(extract_path_from_url(""), "/");
        assert_eq!(extract_path_from_url("?q=1"), "/");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/users/:userId/posts/:post_id"),
            "/users/{userId}/posts/{post_id}"
        );
        assert_eq!(normalize_path("/plain"), "/plain");
    }

    #[test]
    fn test_extract_path_parameter_names() {
        assert_eq!(
            extract_path_parameter_names("/users/{userId}/posts/{postId}"),
            vec!["userId".to_string(), "postId".to_string()]
        );
        assert!(extract_path_parameter_names("/users").is_empty());
    }
}
