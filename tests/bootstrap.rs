use gamification_github::api::{Page, Pagination, WebHook};
use gamification_github::bootstrap::{self, APP_ID};
use gamification_github::extensions::{ACTIONS_POINT, ADMIN_POINT, CONNECTORS_POINT};
use gamification_github::ui::hooks::render_hooks;
use gamification_github::Settings;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, language: &str) -> Settings {
    let mut settings = Settings::new(&server.uri());
    settings.language = language.into();
    settings
}

#[tokio::test]
async fn loads_locale_before_building_the_app() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/portal/rest/i18n/bundle/locale.portlet.GitHubWebHookManagement-fr.json",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "githubConnector.webhook.organizations": "Organisations",
            "githubConnector.webhook.noWebhooks": "Aucun webhook"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = bootstrap::init(settings(&server, "fr")).await.unwrap();
    assert_eq!(app.id, APP_ID);
    assert_eq!(app.messages.len(), 2);
    assert_eq!(app.registry.resolve(CONNECTORS_POINT).len(), 1);
    assert_eq!(app.registry.resolve(ACTIONS_POINT).len(), 1);
    assert_eq!(app.registry.resolve(ADMIN_POINT).len(), 1);

    let out = render_hooks(&app, &Page::<WebHook>::default());
    assert_eq!(out, "Organisations (0/0)\n  Aucun webhook\n");
}

#[tokio::test]
async fn missing_locale_falls_back_to_defaults() {
    let server = MockServer::start().await;

    let app = bootstrap::init(settings(&server, "de")).await.unwrap();
    assert!(app.messages.is_empty());
    assert_eq!(app.t("githubConnector.webhook.organizations", "Organizations"), "Organizations");
}

#[tokio::test]
async fn app_client_lists_webhooks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portal/rest/gamification/connectors/github/hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "organizationId": 77, "name": "meeds-io", "enabled": true}],
            "offset": 0,
            "totalSize": 3
        })))
        .mount(&server)
        .await;

    let app = bootstrap::init(settings(&server, "en")).await.unwrap();
    let page = app.client.list_webhooks(Pagination::default()).await.unwrap();
    let out = render_hooks(&app, &page);
    assert!(out.starts_with("Organizations (1/3)\n"));
    assert!(out.contains("meeds-io"));
    assert!(out.contains("use --offset 1 for more"));
}
