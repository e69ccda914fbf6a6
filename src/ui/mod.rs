use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::api::Secret;
use crate::app::Settings;
use crate::bootstrap::{self, AdminApp};

pub mod hooks;
pub mod login;
pub mod repos;

#[derive(Parser)]
#[command(version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "PATH", env("GAMIFICATION_GITHUB_CONFIG"))]
    pub config: Option<PathBuf>,
    /// Portal base URL, e.g. https://meeds.example
    #[arg(long, global = true, env("PORTAL_URL"))]
    pub portal_url: Option<String>,
    /// Cookie header of an authenticated portal session
    #[arg(long, global = true, env("PORTAL_SESSION_COOKIE"), hide_env_values = true)]
    pub session_cookie: Option<String>,
    /// Language of the labels
    #[arg(long, global = true, env("PORTAL_LANGUAGE"))]
    pub language: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the portal connection settings
    Login {
        /// Portal base URL
        url: String,
        /// Cookie header of an authenticated portal session
        #[arg(long, env("PORTAL_SESSION_COOKIE"), hide_env_values = true)]
        cookie: Option<String>,
        /// GitHub OAuth application client id
        #[arg(long, env("GITHUB_CLIENT_ID"))]
        client_id: Option<String>,
    },
    /// Show the GitHub OAuth popup for connecting an account
    Connect {
        /// Width of the window the popup is centered on
        #[arg(long, default_value = "1280")]
        viewport_width: i32,
        /// Height of the window the popup is centered on
        #[arg(long, default_value = "800")]
        viewport_height: i32,
    },
    /// Manage organization webhooks
    Hooks {
        #[command(subcommand)]
        command: HookCommands,
    },
    /// Manage the repositories watched under a webhook
    Repos {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Choose which events feed gamification
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Watch every repository of an organization, or only enabled ones
    WatchScope {
        #[command(subcommand)]
        command: Toggle,
    },
    /// Tell whether an action label is rendered as a GitHub action
    Actions {
        label: String,
    },
}

#[derive(Subcommand)]
pub enum HookCommands {
    List {
        #[arg(long, default_value = "0")]
        offset: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    Show {
        id: i64,
    },
    Add {
        organization: String,
        /// GitHub personal access token
        #[arg(long, env("GITHUB_ACCESS_TOKEN"), hide_env_values = true)]
        token: String,
        /// Secret used by GitHub to sign deliveries
        #[arg(long, env("GITHUB_HOOK_SECRET"), hide_env_values = true)]
        secret: Option<String>,
    },
    /// Replace the access token of a webhook
    Token {
        id: i64,
        #[arg(long, env("GITHUB_ACCESS_TOKEN"), hide_env_values = true)]
        token: String,
    },
    Delete {
        organization_id: i64,
    },
    /// Resynchronize every webhook with GitHub
    Refresh,
}

#[derive(Subcommand)]
pub enum RepoCommands {
    List {
        organization_id: i64,
        #[arg(long, default_value = "0")]
        offset: u32,
        #[arg(long, default_value = "10")]
        limit: u32,
        #[arg(short, long, default_value = "")]
        keyword: String,
    },
    Enable {
        organization_id: i64,
        repository_id: i64,
    },
    Disable {
        organization_id: i64,
        repository_id: i64,
    },
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Show every known action and whether the webhook forwards it
    List {
        webhook_id: i64,
    },
    Enable {
        organization_id: i64,
        event: String,
    },
    Disable {
        organization_id: i64,
        event: String,
    },
}

#[derive(Subcommand)]
pub enum Toggle {
    Enable { organization_id: i64 },
    Disable { organization_id: i64 },
}

impl Cli {
    /// Stored settings with command line overrides applied.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref()).context("couldn't load settings")?;
        if let Some(url) = &self.portal_url {
            settings.base_url = crate::utils::normalize_url(url);
        }
        if let Some(cookie) = &self.session_cookie {
            settings.session_cookie = Some(Secret::new(cookie.as_str()));
        }
        if let Some(lang) = &self.language {
            settings.language = lang.clone();
        }
        Ok(settings)
    }
}

async fn admin_app(settings: Settings) -> anyhow::Result<AdminApp> {
    if settings.base_url.is_empty() {
        anyhow::bail!("no portal configured, run `login <url>` or pass --portal-url");
    }
    bootstrap::init(settings).await.context("failed to start webhook management")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings()?;
    match cli.command {
        Commands::Login { url, cookie, client_id } => {
            let path = login::save_login(settings, cli.config.as_deref(), &url, cookie, client_id)?;
            println!("Saved settings to {}", path.display());
        }
        Commands::Connect {
            viewport_width,
            viewport_height,
        } => login::connect(&settings, viewport_width, viewport_height)?,
        Commands::Actions { label } => println!("{}", login::describe_action(&label)),
        Commands::Hooks { command } => hooks::run(&admin_app(settings).await?, command).await?,
        Commands::Repos { command } => repos::run(&admin_app(settings).await?, command).await?,
        Commands::Events { command } => hooks::run_events(&admin_app(settings).await?, command).await?,
        Commands::WatchScope { command } => {
            let app = admin_app(settings).await?;
            let (organization_id, enabled) = match command {
                Toggle::Enable { organization_id } => (organization_id, true),
                Toggle::Disable { organization_id } => (organization_id, false),
            };
            app.client
                .set_watch_scope_enabled(organization_id, enabled)
                .await?;
            println!(
                "Watch scope of organization {organization_id} {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repos_list_defaults() {
        let cli = Cli::try_parse_from(["gamification-github", "repos", "list", "42"]).unwrap();
        match cli.command {
            Commands::Repos {
                command:
                    RepoCommands::List {
                        organization_id,
                        offset,
                        limit,
                        keyword,
                    },
            } => {
                assert_eq!(organization_id, 42);
                assert_eq!((offset, limit), (0, 10));
                assert_eq!(keyword, "");
            }
            _ => panic!("expected repos list"),
        }
    }
}
