use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::api::Secret;
use crate::app::Settings;
use crate::connector::{ConnectorDescriptor, OauthPopup, PopupLauncher, Viewport};
use crate::extensions::{register_github, ExtensionRegistry};

/// Persists the portal location and session, keeping any other stored setting.
pub fn save_login(
    mut settings: Settings,
    path: Option<&Path>,
    url: &str,
    cookie: Option<String>,
    client_id: Option<String>,
) -> anyhow::Result<PathBuf> {
    let url = crate::utils::normalize_url(url);
    if url == "https://" {
        anyhow::bail!("Please enter the portal URL.");
    }
    settings.base_url = url;
    if cookie.is_some() {
        settings.session_cookie = cookie.map(Secret::from);
    }
    if let Some(id) = client_id {
        settings.oauth_client_id = id;
    }
    settings.save(path).context("Failed to save settings")
}

/// Writes the popup description instead of opening a browser window.
pub struct PrintLauncher<W> {
    out: std::cell::RefCell<W>,
}

impl<W: Write> PrintLauncher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: std::cell::RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> PopupLauncher for PrintLauncher<W> {
    fn open(&self, popup: &OauthPopup) -> std::io::Result<()> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", popup.name)?;
        writeln!(out, "  url:      {}", popup.url)?;
        writeln!(out, "  features: {}", popup.features())
    }
}

pub fn connect(settings: &Settings, viewport_width: i32, viewport_height: i32) -> anyhow::Result<()> {
    let connector = ConnectorDescriptor::github(settings);
    if connector.client_id.is_empty() {
        log::warn!("no OAuth client id configured, GitHub will reject the authorize request");
    }
    let launcher = PrintLauncher::new(std::io::stdout());
    connector
        .launch(
            Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            &launcher,
        )
        .context("couldn't show the OAuth popup")?;
    Ok(())
}

pub fn describe_action(label: &str) -> String {
    let mut registry = ExtensionRegistry::new();
    register_github(&mut registry);
    match registry.renderer_for(label) {
        Some((ext, renderer)) => format!(
            "{label}: rendered by '{}' (rank {}, icon {})",
            ext.id, ext.rank, renderer.icon
        ),
        None => format!("{label}: not a GitHub action"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn login_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        let mut settings = Settings::default();
        settings.language = "fr".into();

        save_login(settings, Some(&path), "meeds.example/", Some("JSESSIONID=1".into()), None).unwrap();
        let saved = Settings::load(Some(&path)).unwrap();
        assert_eq!(saved.base_url, "https://meeds.example");
        assert_eq!(saved.session_cookie.as_ref().map(Secret::expose), Some("JSESSIONID=1"));
        assert_eq!(saved.language, "fr");
    }

    #[test]
    fn empty_url_is_refused() {
        let dir = TempDir::new().unwrap();
        assert!(save_login(Settings::default(), Some(&dir.path().join("s.toml")), "  ", None, None).is_err());
    }

    #[test]
    fn print_launcher_writes_features() {
        let mut settings = Settings::new("https://meeds.example");
        settings.oauth_client_id = "abc".into();
        let launcher = PrintLauncher::new(Vec::new());
        ConnectorDescriptor::github(&settings)
            .launch(Viewport { width: 1000, height: 900 }, &launcher)
            .unwrap();
        let out = String::from_utf8(launcher.into_inner()).unwrap();
        assert!(out.contains("width=500, height=600, left=250, top=150"));
        assert!(out.contains("client_id=abc"));
    }

    #[test]
    fn describes_actions() {
        assert_eq!(
            describe_action("pushCode"),
            "pushCode: rendered by 'github' (rank 60, icon fab fa-github)"
        );
        assert_eq!(describe_action("PushCode"), "PushCode: not a GitHub action");
    }
}
