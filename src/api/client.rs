use log::{debug, info, warn};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::{ApiError, Operation, Result};
use crate::api::form::FormBody;
use crate::api::models::{NewWebHook, Page, Pagination, Repository, Secret, WebHook};
use crate::app::Settings;

/// Talks to the portal's GitHub webhook management service.
///
/// Every call is authenticated by the portal session cookie only. Nothing is
/// cached: reads always hit the backend.
#[derive(Debug, Clone)]
pub struct HooksClient {
    http: HttpClient,
    hooks_url: Url,
}

/// Reqwest client carrying the portal session cookie on every request.
pub fn build_http(settings: &Settings) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = settings
        .session_cookie
        .as_ref()
        .map(Secret::expose)
        .filter(|c| !c.is_empty())
    {
        let mut value = HeaderValue::from_str(cookie)?;
        value.set_sensitive(true);
        headers.insert(header::COOKIE, value);
    }
    let mut builder = HttpClient::builder()
        .default_headers(headers)
        .cookie_store(true);
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ApiError::Client)
}

impl HooksClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_http(build_http(settings)?, &settings.hooks_url())
    }

    /// Uses a preconfigured reqwest client, e.g. one shared with the rest of the app.
    pub fn with_http(http: HttpClient, hooks_url: &str) -> Result<Self> {
        let hooks_url = Url::parse(hooks_url.trim_end_matches('/'))?;
        if hooks_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { http, hooks_url })
    }

    pub fn hooks_url(&self) -> &Url {
        &self.hooks_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.hooks_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn paged(&self, segments: &[&str], page: Pagination) -> Url {
        let mut url = self.endpoint(segments);
        url.query_pairs_mut()
            .append_pair("offset", &page.offset.to_string())
            .append_pair("limit", &page.limit.to_string())
            .append_pair("returnSize", "true");
        url
    }

    async fn send(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        form: Option<FormBody>,
    ) -> Result<Response> {
        debug!("{method} {url}");
        let mut req = self.http.request(method, url);
        if let Some(form) = form {
            req = req.form(form.pairs());
        }
        req.send().await.map_err(|e| {
            warn!("{}: {e}", operation.failure_message());
            ApiError::request(operation, None)
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: Operation, url: Url) -> Result<T> {
        let resp = self.send(operation, Method::GET, url, None).await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{}: HTTP {status}", operation.failure_message());
            return Err(ApiError::request(operation, Some(status)));
        }
        let text = resp
            .text()
            .await
            .map_err(|_| ApiError::request(operation, Some(status)))?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { operation, source })
    }

    /// Mutations only look at the status code; the body is ignored.
    async fn mutate(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        form: Option<FormBody>,
    ) -> Result<()> {
        let resp = self.send(operation, method, url, form).await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!("{}: HTTP {status}", operation.failure_message());
            Err(ApiError::request(operation, Some(status)))
        }
    }

    pub async fn list_webhooks(&self, page: Pagination) -> Result<Page<WebHook>> {
        let url = self.paged(&[], page);
        self.get_json(Operation::ListWebHooks, url).await
    }

    pub async fn get_webhook(&self, id: i64) -> Result<WebHook> {
        let id = id.to_string();
        let url = self.endpoint(&[id.as_str()]);
        self.get_json(Operation::GetWebHook, url).await
    }

    /// Registers an organization webhook. On 401 and 404 the backend explains the
    /// refusal (bad token, unknown organization) and that text is returned as is.
    pub async fn save_webhook(&self, hook: &NewWebHook) -> Result<()> {
        let operation = Operation::SaveWebHook;
        let form = FormBody::new()
            .append("organizationName", hook.organization_name.as_str())
            .append("accessToken", hook.access_token.expose())
            .append_opt("hookSecret", hook.hook_secret.as_ref().map(Secret::expose));
        let resp = self
            .send(operation, Method::POST, self.endpoint(&[]), Some(form))
            .await?;
        let status = resp.status();
        if status.is_success() {
            info!("registered webhook for organization {}", hook.organization_name);
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            let message = resp
                .text()
                .await
                .map_err(|_| ApiError::request(operation, Some(status)))?;
            warn!("webhook creation rejected ({status}): {message}");
            return Err(ApiError::Rejected { status, message });
        }
        warn!("{}: HTTP {status}", operation.failure_message());
        Err(ApiError::request(operation, Some(status)))
    }

    pub async fn update_webhook_access_token(&self, webhook_id: i64, access_token: &Secret) -> Result<()> {
        let id = webhook_id.to_string();
        let form = FormBody::new()
            .append("webHookId", id.as_str())
            .append("accessToken", access_token.expose());
        self.mutate(
            Operation::UpdateAccessToken,
            Method::PATCH,
            self.endpoint(&[]),
            Some(form),
        )
        .await?;
        info!("updated access token of webhook {webhook_id}");
        Ok(())
    }

    pub async fn delete_webhook(&self, organization_id: i64) -> Result<()> {
        let id = organization_id.to_string();
        let url = self.endpoint(&[id.as_str()]);
        self.mutate(Operation::DeleteWebHook, Method::DELETE, url, None).await?;
        info!("deleted webhook of organization {organization_id}");
        Ok(())
    }

    /// Lists an organization's repositories. An empty keyword means no filter.
    pub async fn list_repositories(
        &self,
        organization_id: i64,
        page: Pagination,
        keyword: Option<&str>,
    ) -> Result<Page<Repository>> {
        let id = organization_id.to_string();
        let mut url = self.paged(&[id.as_str(), "repos"], page);
        url.query_pairs_mut()
            .append_pair("keyword", keyword.unwrap_or_default());
        self.get_json(Operation::ListRepositories, url).await
    }

    pub async fn set_repository_enabled(
        &self,
        repository_id: i64,
        organization_id: i64,
        enabled: bool,
    ) -> Result<()> {
        let form = FormBody::new()
            .append("repositoryId", repository_id)
            .append("organizationId", organization_id)
            .append("enabled", enabled);
        self.mutate(
            Operation::SetRepositoryStatus,
            Method::POST,
            self.endpoint(&["repo", "status"]),
            Some(form),
        )
        .await
    }

    /// Toggles whether every repository of the organization is watched.
    pub async fn set_watch_scope_enabled(&self, organization_id: i64, enabled: bool) -> Result<()> {
        let form = FormBody::new()
            .append("organizationId", organization_id)
            .append("enabled", enabled);
        self.mutate(
            Operation::SetWatchScope,
            Method::POST,
            self.endpoint(&["watchScope", "status"]),
            Some(form),
        )
        .await
    }

    pub async fn set_event_enabled(&self, organization_id: i64, event: &str, enabled: bool) -> Result<()> {
        let form = FormBody::new()
            .append("organizationId", organization_id)
            .append("event", event)
            .append("enabled", enabled);
        self.mutate(
            Operation::SetEventStatus,
            Method::POST,
            self.endpoint(&["event", "status"]),
            Some(form),
        )
        .await
    }

    /// Asks the backend to resynchronize every webhook with GitHub.
    pub async fn force_refresh_webhooks(&self) -> Result<()> {
        self.mutate(
            Operation::ForceRefresh,
            Method::PATCH,
            self.endpoint(&["forceUpdate"]),
            None,
        )
        .await?;
        info!("requested webhooks resynchronization");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HooksClient {
        HooksClient::with_http(
            HttpClient::new(),
            "https://meeds.example/portal/rest/gamification/connectors/github/hooks/",
        )
        .unwrap()
    }

    #[test]
    fn endpoints_are_appended_to_the_hooks_root() {
        let c = client();
        assert_eq!(
            c.endpoint(&["watchScope", "status"]).as_str(),
            "https://meeds.example/portal/rest/gamification/connectors/github/hooks/watchScope/status"
        );
        assert_eq!(
            c.endpoint(&[]).as_str(),
            "https://meeds.example/portal/rest/gamification/connectors/github/hooks"
        );
    }

    #[test]
    fn paged_urls_carry_offset_limit_and_size() {
        let url = client().paged(&["12", "repos"], Pagination::default());
        assert_eq!(url.path(), "/portal/rest/gamification/connectors/github/hooks/12/repos");
        assert_eq!(url.query(), Some("offset=0&limit=10&returnSize=true"));
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(HooksClient::with_http(HttpClient::new(), "mailto:admin@meeds.io").is_err());
    }

    #[test]
    fn bad_cookie_is_an_error() {
        let mut settings = Settings::new("https://meeds.example");
        settings.session_cookie = Some("JSESSIONID=abc\n".into());
        assert!(matches!(HooksClient::new(&settings), Err(ApiError::InvalidCookie(_))));
    }
}
