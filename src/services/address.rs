//! Address interpretation for the shell.
//!
//! Turns whatever the user typed into the address bar into a loadable URL and
//! derives favicon URLs from page addresses. Pure string logic, no network.

use url::Url;

use crate::types::settings::ShellSettings;

/// Interprets raw address-bar input and derives favicon URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressResolver {
    homepage: String,
    search_url: String,
    favicon_service: String,
}

impl AddressResolver {
    pub fn new(
        homepage: impl Into<String>,
        search_url: impl Into<String>,
        favicon_service: impl Into<String>,
    ) -> Self {
        Self {
            homepage: homepage.into(),
            search_url: search_url.into(),
            favicon_service: favicon_service.into(),
        }
    }

    pub fn from_settings(settings: &ShellSettings) -> Self {
        Self::new(
            settings.homepage.clone(),
            settings.search_url.clone(),
            settings.favicon_service.clone(),
        )
    }

    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Normalizes raw input into a fully-qualified URL.
    ///
    /// - blank input yields the homepage
    /// - `http://` and `https://` addresses pass through untouched
    /// - dotted input without spaces is treated as a host and gets `https://`
    /// - anything else becomes a search query
    pub fn to_url(&self, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return self.homepage.clone();
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return trimmed.to_string();
        }
        if trimmed.contains('.') && !trimmed.contains(' ') {
            return format!("https://{}", trimmed);
        }
        self.search_query_url(trimmed)
    }

    /// Search URL for a free-text query.
    pub fn search_query_url(&self, query: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(query))
    }

    /// Favicon URL for the host of `page_url`, or `None` if the address has no host.
    pub fn favicon_for(&self, page_url: &str) -> Option<String> {
        let parsed = Url::parse(page_url).ok()?;
        let host = parsed.host_str().filter(|h| !h.is_empty())?;
        Some(self.favicon_service.replace("{host}", host))
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::from_settings(&ShellSettings::default())
    }
}
