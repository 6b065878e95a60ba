use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie carrying the admin session token
pub const ADMIN_COOKIE: &str = "admin_auth";

/// Extract the session token from request cookies.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    let prefix = format!("{}=", ADMIN_COOKIE);
    cookie_header
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with(&prefix))?
        .strip_prefix(&prefix)
        .map(str::to_string)
}

/// Set-Cookie value for a freshly issued session.
pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ADMIN_COOKIE, token, max_age_seconds
    )
}

/// Set-Cookie value that clears the session cookie.
pub fn clear_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", ADMIN_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_extract_token() {
        let h = headers("admin_auth=abc123");
        assert_eq!(extract_token(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let h = headers("theme=dark; admin_auth=abc123; lang=en");
        assert_eq!(extract_token(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_missing_cookie() {
        let h = headers("theme=dark; lang=en");
        assert_eq!(extract_token(&h), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_prefix_is_not_enough() {
        // A cookie merely starting with the name must not match
        let h = headers("admin_auth_old=stale");
        assert_eq!(extract_token(&h), None);
    }

    #[test]
    fn test_cookie_round_trip() {
        let set = session_cookie("abc123", 86400);
        assert!(set.starts_with("admin_auth=abc123;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=86400"));

        let value = set.split(';').next().unwrap();
        let h = headers(value);
        assert_eq!(extract_token(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_clear_cookie() {
        let clear = clear_cookie();
        assert!(clear.starts_with("admin_auth=;"));
        assert!(clear.contains("Max-Age=0"));
    }
}
