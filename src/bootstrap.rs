use log::info;

use crate::api::client::{build_http, HooksClient};
use crate::api::error::ApiError;
use crate::app::Settings;
use crate::connector::ConnectorDescriptor;
use crate::extensions::{register_github, ExtensionRegistry};
use crate::i18n::{load_messages_or_default, Messages};

pub const APP_ID: &str = "gitHubWebHookManagementApp";
pub const APP_TITLE: &str = "Github Webhook Management";

/// The webhook management app once locale resources are ready.
#[derive(Debug)]
pub struct AdminApp {
    pub id: &'static str,
    pub title: &'static str,
    pub settings: Settings,
    pub client: HooksClient,
    pub connector: ConnectorDescriptor,
    pub messages: Messages,
    pub registry: ExtensionRegistry,
}

impl AdminApp {
    pub fn t<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.messages.get_or(key, fallback)
    }
}

/// Loads the locale bundle, then builds the app around an injected registry.
pub async fn init_with_registry(settings: Settings, mut registry: ExtensionRegistry) -> Result<AdminApp, ApiError> {
    let http = build_http(&settings)?;
    let messages = load_messages_or_default(&http, &settings).await;
    let client = HooksClient::with_http(http, &settings.hooks_url())?;
    register_github(&mut registry);
    info!(
        "{APP_ID} ready ({} messages, {} extensions)",
        messages.len(),
        registry.len()
    );
    Ok(AdminApp {
        id: APP_ID,
        title: APP_TITLE,
        connector: ConnectorDescriptor::github(&settings),
        settings,
        client,
        messages,
        registry,
    })
}

pub async fn init(settings: Settings) -> Result<AdminApp, ApiError> {
    init_with_registry(settings, ExtensionRegistry::new()).await
}
