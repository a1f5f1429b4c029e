//! Storefront configuration (messaging deep link target, page label).

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

pub const MESSAGING_URL_ENV: &str = "STOREFRONT_MESSAGING_URL";
pub const RECIPIENT_ID_ENV: &str = "STOREFRONT_RECIPIENT_ID";
pub const PAGE_LABEL_ENV: &str = "STOREFRONT_PAGE_LABEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Base URL of the messaging service, without trailing slash.
    pub messaging_base_url: String,
    /// Digits-only recipient number.
    pub recipient_id: String,
    /// Used when the document title is blank.
    pub default_page_label: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            messaging_base_url: "https://wa.me".to_string(),
            recipient_id: "919999999999".to_string(),
            default_page_label: "Website".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Defaults overlaid with `STOREFRONT_*` environment variables.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(MESSAGING_URL_ENV) {
            config.messaging_base_url = url;
        }
        if let Some(id) = lookup(RECIPIENT_ID_ENV) {
            config.recipient_id = id;
        }
        if let Some(label) = lookup(PAGE_LABEL_ENV) {
            config.default_page_label = label;
        }
        config.validated()
    }

    /// Normalise and check every field.
    pub fn validated(mut self) -> DomainResult<Self> {
        let url = self.messaging_base_url.trim().trim_end_matches('/');
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(DomainError::config(
                "messaging_base_url",
                format!("expected an http(s) URL, got {url:?}"),
            ));
        }
        self.messaging_base_url = url.to_string();

        let id = self.recipient_id.trim();
        let id = id.strip_prefix('+').unwrap_or(id);
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::config(
                "recipient_id",
                format!("expected digits only, got {:?}", self.recipient_id),
            ));
        }
        self.recipient_id = id.to_string();

        let label = self.default_page_label.trim();
        self.default_page_label = if label.is_empty() {
            Self::default().default_page_label
        } else {
            label.to_string()
        };

        tracing::debug!(
            messaging_base_url = %self.messaging_base_url,
            recipient_id = %self.recipient_id,
            "storefront config loaded"
        );
        Ok(self)
    }

    /// `<base>/<recipient>?text=<url-encoded message>`.
    pub fn deep_link(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.messaging_base_url,
            self.recipient_id,
            urlencoding::encode(message)
        )
    }

    /// Page-context label: the trimmed document title, or the default label.
    pub fn page_label<'a>(&'a self, document_title: &'a str) -> &'a str {
        let title = document_title.trim();
        if title.is_empty() {
            &self.default_page_label
        } else {
            title
        }
    }
}
