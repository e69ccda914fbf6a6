use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;

use crate::api::error::{ApiError, Operation};
use crate::app::Settings;
use crate::extensions::LOCALE_BUNDLE;

/// Flat key to text map loaded from the portal's i18n bundle service.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Messages(HashMap<String, String>);

impl Messages {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self(entries)
    }

    /// Falls back to the key itself, like the portal does for missing entries.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn bundle_url(settings: &Settings) -> String {
    format!(
        "{}/i18n/bundle/{LOCALE_BUNDLE}-{}.json",
        settings.rest_url(),
        settings.language
    )
}

pub async fn load_messages(http: &reqwest::Client, settings: &Settings) -> Result<Messages, ApiError> {
    let operation = Operation::LoadLocale;
    let url = bundle_url(settings);
    debug!("GET {url}");
    let resp = http
        .get(&url)
        .send()
        .await
        .map_err(|_| ApiError::request(operation, None))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::request(operation, Some(status)));
    }
    let text = resp
        .text()
        .await
        .map_err(|_| ApiError::request(operation, Some(status)))?;
    serde_json::from_str(&text).map_err(|source| ApiError::Decode { operation, source })
}

/// Like [`load_messages`] but never fails: labels then show their keys.
pub async fn load_messages_or_default(http: &reqwest::Client, settings: &Settings) -> Messages {
    match load_messages(http, settings).await {
        Ok(messages) => messages,
        Err(e) => {
            warn!("locale {} unavailable, using message keys: {e}", settings.language);
            Messages::default()
        }
    }
}
