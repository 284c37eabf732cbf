//! Utility functions and helpers.

pub mod http;
pub mod xml;

use url::Url;

use crate::error::Result;

/// Join an API path onto a base URL, tolerating a missing trailing slash.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Remove every literal double-quote character.
pub fn strip_quotes(s: &str) -> String {
    s.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("https://api.twitter.com", "/1.1/statuses/user_timeline.json")
                .unwrap()
                .as_str(),
            "https://api.twitter.com/1.1/statuses/user_timeline.json"
        );
        assert_eq!(
            endpoint_url("http://localhost:8080/proxy", "1.1/x.json")
                .unwrap()
                .as_str(),
            "http://localhost:8080/proxy/1.1/x.json"
        );
    }

    #[test]
    fn test_endpoint_url_invalid_base() {
        assert!(endpoint_url("not a url", "x").is_err());
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(r#"say "hi""#), "say hi");
        assert_eq!(strip_quotes("plain"), "plain");
    }
}
