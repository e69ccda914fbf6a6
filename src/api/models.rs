use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque credential. Never printed, only sent in request bodies.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenStatus {
    pub valid: bool,
    pub expired: bool,
    pub expires_at: Option<String>,
    pub scopes: Vec<String>,
    pub remaining: Option<i64>,
}

/// A webhook registration as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebHook {
    pub id: i64,
    pub webhook_id: i64,
    pub organization_id: i64,
    /// Organization login.
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    /// Event names currently feeding gamification.
    pub triggers: Vec<String>,
    pub enabled: bool,
    pub watched_date: Option<String>,
    pub watched_by: Option<String>,
    pub updated_date: Option<String>,
    pub refresh_date: Option<String>,
    pub watch_scope_limited: bool,
    pub token_status: Option<TokenStatus>,
}

impl WebHook {
    pub fn is_event_enabled(&self, event: &str) -> bool {
        self.triggers.iter().any(|t| t == event)
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(&self.name)
    }
}

/// Payload for registering a new organization webhook.
#[derive(Debug, Clone)]
pub struct NewWebHook {
    pub organization_name: String,
    pub access_token: Secret,
    pub hook_secret: Option<Secret>,
}

impl NewWebHook {
    pub fn new(organization_name: impl Into<String>, access_token: Secret) -> Self {
        Self {
            organization_name: organization_name.into(),
            access_token,
            hook_secret: None,
        }
    }

    pub fn with_hook_secret(mut self, secret: Secret) -> Self {
        self.hook_secret = Some(secret);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    #[serde(alias = "repositoryId")]
    pub id: i64,
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub enabled: bool,
}

/// One page of a listing. `total_size` is only filled when `returnSize=true` was asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// `webhooks` and `remoteRepositories` are the backend's list keys.
    #[serde(alias = "webhooks", alias = "remoteRepositories")]
    pub items: Vec<T>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default, alias = "size")]
    pub total_size: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            limit: 0,
            total_size: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        (self.offset as u64 + self.items.len() as u64) < self.total_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
