use std::fmt::Write;

use crate::api::events::GithubAction;
use crate::api::{NewWebHook, Page, Pagination, Secret, WebHook};
use crate::bootstrap::AdminApp;
use crate::ui::{EventCommands, HookCommands};

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

fn token_state(hook: &WebHook) -> &'static str {
    match &hook.token_status {
        Some(s) if s.expired => "expired",
        Some(s) if s.valid => "valid",
        Some(_) => "invalid",
        None => "unknown",
    }
}

pub fn render_hooks(app: &AdminApp, page: &Page<WebHook>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}/{})",
        app.t("githubConnector.webhook.organizations", "Organizations"),
        page.items.len(),
        page.total_size
    );
    if page.items.is_empty() {
        let _ = writeln!(out, "  {}", app.t("githubConnector.webhook.noWebhooks", "No webhooks yet"));
        return out;
    }
    let _ = writeln!(out, "  {:<8} {:<12} {:<24} {:<8} {:<8} {}", "ID", "ORG ID", "NAME", "ENABLED", "SCOPE", "TOKEN");
    for hook in &page.items {
        let scope = if hook.watch_scope_limited { "limited" } else { "all" };
        let _ = writeln!(
            out,
            "  {:<8} {:<12} {:<24} {:<8} {:<8} {}",
            hook.id,
            hook.organization_id,
            hook.display_name(),
            yes_no(hook.enabled),
            scope,
            token_state(hook)
        );
    }
    if page.has_more() {
        let _ = writeln!(out, "  ... use --offset {} for more", page.offset as usize + page.items.len());
    }
    out
}

pub fn render_hook(hook: &WebHook) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", hook.display_name(), hook.id);
    let _ = writeln!(out, "  organization: {} ({})", hook.name, hook.organization_id);
    if let Some(desc) = hook.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  description:  {desc}");
    }
    let _ = writeln!(out, "  enabled:      {}", yes_no(hook.enabled));
    let _ = writeln!(out, "  watch scope:  {}", if hook.watch_scope_limited { "limited" } else { "all" });
    let _ = writeln!(out, "  token:        {}", token_state(hook));
    if let Some(by) = &hook.watched_by {
        let _ = writeln!(out, "  watched by:   {by} on {}", hook.watched_date.as_deref().unwrap_or("?"));
    }
    if let Some(date) = &hook.refresh_date {
        let _ = writeln!(out, "  refreshed:    {date}");
    }
    let _ = writeln!(out, "  events:       {}", hook.triggers.join(", "));
    out
}

pub fn render_events(hook: &WebHook) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} events", hook.display_name());
    for action in GithubAction::ALL {
        let mark = if hook.is_event_enabled(action.label()) { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {:<22} ({})", action.label(), action.github_event());
    }
    out
}

pub async fn run(app: &AdminApp, command: HookCommands) -> anyhow::Result<()> {
    match command {
        HookCommands::List { offset, limit } => {
            let page = app.client.list_webhooks(Pagination::new(offset, limit)).await?;
            print!("{}", render_hooks(app, &page));
        }
        HookCommands::Show { id } => {
            let hook = app.client.get_webhook(id).await?;
            print!("{}", render_hook(&hook));
        }
        HookCommands::Add {
            organization,
            token,
            secret,
        } => {
            let token = Secret::new(token);
            if organization.trim().is_empty() || token.is_blank() {
                anyhow::bail!("organization and access token are mandatory");
            }
            let mut hook = NewWebHook::new(organization.trim(), token);
            if let Some(secret) = secret.filter(|s| !s.is_empty()) {
                hook = hook.with_hook_secret(Secret::new(secret));
            }
            app.client.save_webhook(&hook).await?;
            println!("Webhook created for {}", hook.organization_name);
        }
        HookCommands::Token { id, token } => {
            app.client
                .update_webhook_access_token(id, &Secret::new(token))
                .await?;
            println!("Access token of webhook {id} updated");
        }
        HookCommands::Delete { organization_id } => {
            app.client.delete_webhook(organization_id).await?;
            println!("Webhook of organization {organization_id} deleted");
        }
        HookCommands::Refresh => {
            app.client.force_refresh_webhooks().await?;
            println!("Webhooks resynchronization requested");
        }
    }
    Ok(())
}

pub async fn run_events(app: &AdminApp, command: EventCommands) -> anyhow::Result<()> {
    let (organization_id, event, enabled) = match command {
        EventCommands::List { webhook_id } => {
            let hook = app.client.get_webhook(webhook_id).await?;
            print!("{}", render_events(&hook));
            return Ok(());
        }
        EventCommands::Enable { organization_id, event } => (organization_id, event, true),
        EventCommands::Disable { organization_id, event } => (organization_id, event, false),
    };
    if !GithubAction::is_known_label(&event) {
        log::warn!("{event} is not a known GitHub action, sending it anyway");
    }
    app.client
        .set_event_enabled(organization_id, &event, enabled)
        .await?;
    println!("{event} {} for organization {organization_id}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TokenStatus;

    fn hook() -> WebHook {
        WebHook {
            id: 1,
            organization_id: 77,
            name: "meeds-io".into(),
            triggers: vec!["pushCode".into()],
            enabled: true,
            token_status: Some(TokenStatus {
                valid: true,
                ..TokenStatus::default()
            }),
            ..WebHook::default()
        }
    }

    #[test]
    fn events_mark_enabled_triggers() {
        let out = render_events(&hook());
        assert!(out.contains("[x] pushCode"));
        assert!(out.contains("[ ] createIssue"));
    }

    #[test]
    fn hook_details() {
        let out = render_hook(&hook());
        assert!(out.contains("organization: meeds-io (77)"));
        assert!(out.contains("token:        valid"));
        assert!(out.contains("watch scope:  all"));
    }
}
