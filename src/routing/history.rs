//! History strategies.
//!
//! # Responsibilities
//! - Turn an app path into the href shown in the URL bar
//! - Turn a browser location back into an app path
//!
//! ```text
//! base = "/laRechercheWeb/", app path = "/recherche?q=verne"
//!     Browser → /laRechercheWeb/recherche?q=verne
//!     Hash    → /laRechercheWeb/#/recherche?q=verne
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// How in-app navigation is reflected in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Path-based URLs; the server must answer every app path with the shell.
    #[default]
    Browser,
    /// Fragment-based URLs; the server only ever sees the base path.
    Hash,
}

impl HistoryMode {
    /// Full href for an app-relative path (which may carry a query).
    pub fn href(self, base: &str, app_path: &str) -> String {
        let relative = app_path.trim_start_matches('/');
        match self {
            HistoryMode::Browser => format!("{}{}", base, relative),
            HistoryMode::Hash => format!("{}#/{}", base, relative),
        }
    }

    /// App-relative path (with query) for a location, or `None` when the
    /// location is outside the base path.
    ///
    /// `location` may be an absolute URL or an origin-relative path. A
    /// leading "//" is part of the path, never a host.
    pub fn app_path(self, base: &str, location: &str) -> Option<String> {
        let url = location_url(location)?;
        let below_base = strip_base(base, url.path())?;

        match self {
            HistoryMode::Browser => Some(match url.query() {
                Some(query) => format!("{}?{}", below_base, query),
                None => below_base.to_string(),
            }),
            HistoryMode::Hash => {
                if below_base != "/" && below_base != "/index.html" {
                    return None;
                }
                let fragment = url.fragment().unwrap_or_default();
                Some(if fragment.starts_with('/') {
                    fragment.to_string()
                } else {
                    format!("/{}", fragment)
                })
            }
        }
    }
}

impl std::fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryMode::Browser => write!(f, "browser"),
            HistoryMode::Hash => write!(f, "hash"),
        }
    }
}

fn location_url(location: &str) -> Option<Url> {
    if location.starts_with('/') {
        return Url::parse(&format!("http://localhost{}", location)).ok();
    }
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").and_then(|origin| origin.join(location)).ok()
        }
        Err(_) => None,
    }
}

/// Remove the base prefix on a segment boundary. "/" when the path is the base itself.
fn strip_base<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    let prefix = base.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/laRechercheWeb/";

    #[test]
    fn test_browser_href() {
        assert_eq!(HistoryMode::Browser.href("/", "/"), "/");
        assert_eq!(HistoryMode::Browser.href("/", "/recherche"), "/recherche");
        assert_eq!(HistoryMode::Browser.href(BASE, "/recherche?q=a"), "/laRechercheWeb/recherche?q=a");
    }

    #[test]
    fn test_hash_href() {
        assert_eq!(HistoryMode::Hash.href("/", "/"), "/#/");
        assert_eq!(HistoryMode::Hash.href(BASE, "/recherche"), "/laRechercheWeb/#/recherche");
    }

    #[test]
    fn test_browser_app_path() {
        let mode = HistoryMode::Browser;
        assert_eq!(mode.app_path(BASE, "/laRechercheWeb/recherche").as_deref(), Some("/recherche"));
        assert_eq!(mode.app_path(BASE, "/laRechercheWeb").as_deref(), Some("/"));
        assert_eq!(
            mode.app_path(BASE, "https://example.org/laRechercheWeb/recherche?q=x#haut").as_deref(),
            Some("/recherche?q=x")
        );
        assert_eq!(mode.app_path(BASE, "/laRechercheWebX/recherche"), None);
        assert_eq!(mode.app_path(BASE, "/ailleurs"), None);
        assert_eq!(mode.app_path("/", "/recherche").as_deref(), Some("/recherche"));
    }

    #[test]
    fn test_hash_app_path() {
        let mode = HistoryMode::Hash;
        assert_eq!(mode.app_path(BASE, "/laRechercheWeb/#/recherche").as_deref(), Some("/recherche"));
        assert_eq!(mode.app_path(BASE, "/laRechercheWeb/").as_deref(), Some("/"));
        assert_eq!(mode.app_path("/", "/#/recherche?q=x").as_deref(), Some("/recherche?q=x"));
        assert_eq!(mode.app_path("/", "/index.html#/recherche").as_deref(), Some("/recherche"));
        assert_eq!(mode.app_path("/", "/recherche"), None);
    }

    #[test]
    fn test_double_slash_is_a_path() {
        let mode = HistoryMode::Browser;
        assert_eq!(
            mode.app_path("/", "//evil.example/recherche").as_deref(),
            Some("//evil.example/recherche")
        );
        assert_eq!(mode.app_path(BASE, "//laRechercheWeb/recherche"), None);
        assert_eq!(
            HistoryMode::Hash.app_path("/", "//evil.example/#/recherche"),
            None
        );
    }

    #[test]
    fn test_app_path_keeps_percent_encoding() {
        assert_eq!(
            HistoryMode::Browser.app_path("/", "/%C3%A0-propos").as_deref(),
            Some("/%C3%A0-propos")
        );
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: HistoryMode,
        }
        let w: Wrapper = toml::from_str("mode = \"hash\"").unwrap();
        assert_eq!(w.mode, HistoryMode::Hash);
    }
}
