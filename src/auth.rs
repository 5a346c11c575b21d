pub const LOGIN_PATH: &str = "/login";
pub const CHAT_PATH: &str = "/chat";

#[derive(Debug, PartialEq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// Decides whether a request for `path` may go through.
///
/// Public pages and the API are always open. Login and registration send
/// signed in users to the chat, the chat sends anonymous users to the
/// login page, and any other page sends signed in users to the chat.
pub fn authorize(path: &str, logged_in: bool) -> Access {
    let is_api = path.starts_with("/api");
    let is_home = path == "/";
    let is_blog = path.starts_with("/blog");
    let is_on_chat = path.starts_with(CHAT_PATH);
    let is_on_register = path.starts_with("/register");
    let is_on_login = path.starts_with(LOGIN_PATH);

    if is_api || is_home || is_blog {
        return Access::Allow;
    }

    if is_on_login || is_on_register {
        return if logged_in { Access::Redirect(CHAT_PATH) } else { Access::Allow };
    }

    if is_on_chat {
        return if logged_in { Access::Allow } else { Access::Redirect(LOGIN_PATH) };
    }

    if logged_in {
        Access::Redirect(CHAT_PATH)
    } else {
        Access::Allow
    }
}

/// Value of cookie `name` in a `Cookie` request header.
pub fn find_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// A request is signed in when it carries the configured session token.
pub fn is_logged_in(cookie_header: Option<&str>, cookie_name: &str, session_token: Option<&str>) -> bool {
    match (cookie_header, session_token) {
        (Some(header), Some(token)) => find_cookie(header, cookie_name) == Some(token),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        for logged_in in [true, false] {
            assert_eq!(authorize("/", logged_in), Access::Allow);
            assert_eq!(authorize("/blog", logged_in), Access::Allow);
            assert_eq!(authorize("/blog/building-a-rag-pipeline", logged_in), Access::Allow);
            assert_eq!(authorize("/api/rss", logged_in), Access::Allow);
            assert_eq!(authorize("/api/publish/medium", logged_in), Access::Allow);
        }
    }

    #[test]
    fn test_login_and_register() {
        assert_eq!(authorize("/login", false), Access::Allow);
        assert_eq!(authorize("/register", false), Access::Allow);
        assert_eq!(authorize("/login", true), Access::Redirect("/chat"));
        assert_eq!(authorize("/register", true), Access::Redirect("/chat"));
    }

    #[test]
    fn test_chat() {
        assert_eq!(authorize("/chat", true), Access::Allow);
        assert_eq!(authorize("/chat/123", true), Access::Allow);
        assert_eq!(authorize("/chat", false), Access::Redirect("/login"));
    }

    #[test]
    fn test_other_pages() {
        assert_eq!(authorize("/admin", false), Access::Allow);
        assert_eq!(authorize("/admin", true), Access::Redirect("/chat"));
        assert_eq!(authorize("/sitemap.xml", false), Access::Allow);
    }

    #[test]
    fn test_find_cookie() {
        let header = "theme=dark; folio_session=abc123; other=\"x\"";
        assert_eq!(find_cookie(header, "folio_session"), Some("abc123"));
        assert_eq!(find_cookie(header, "other"), Some("x"));
        assert_eq!(find_cookie(header, "missing"), None);
        assert_eq!(find_cookie("", "folio_session"), None);
    }

    #[test]
    fn test_is_logged_in() {
        let header = Some("folio_session=abc123");
        assert!(is_logged_in(header, "folio_session", Some("abc123")));
        assert!(!is_logged_in(header, "folio_session", Some("other")));
        assert!(!is_logged_in(header, "folio_session", None));
        assert!(!is_logged_in(None, "folio_session", Some("abc123")));
    }
}
