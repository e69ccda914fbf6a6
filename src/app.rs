use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::api::Secret;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Portal environment handed to every client. Replaces the browser's ambient
/// `eXo.env.portal` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub portal_context: String,
    pub rest_prefix: String,
    pub language: String,
    /// Raw `Cookie` header value of an authenticated portal session.
    pub session_cookie: Option<Secret>,
    pub oauth_client_id: String,
    pub redirect_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            portal_context: "/portal".into(),
            rest_prefix: "rest".into(),
            language: "en".into(),
            session_cookie: None,
            oauth_client_id: String::new(),
            redirect_url: None,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: crate::utils::normalize_url(base_url),
            ..Self::default()
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("gamification-github.toml"))
    }

    /// Loads from `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(SettingsError::Read { path, source }),
        };
        let mut settings: Settings =
            toml::from_str(&text).map_err(|source| SettingsError::Parse { path, source })?;
        if !settings.base_url.is_empty() {
            settings.base_url = crate::utils::normalize_url(&settings.base_url);
        }
        Ok(settings)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, SettingsError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or(SettingsError::NoConfigDir)?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(&path, toml).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// `{base_url}{portal_context}`, e.g. `https://meeds.example/portal`.
    pub fn portal_url(&self) -> String {
        let context = self.portal_context.trim_matches('/');
        let base = self.base_url.trim_end_matches('/');
        if context.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{context}")
        }
    }

    /// Root of the portal REST services.
    pub fn rest_url(&self) -> String {
        format!("{}/{}", self.portal_url(), self.rest_prefix.trim_matches('/'))
    }

    pub fn hooks_url(&self) -> String {
        format!("{}/gamification/connectors/github/hooks", self.rest_url())
    }

    pub fn oauth_redirect_url(&self) -> String {
        match &self.redirect_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("{}/githubAuth/callback", self.portal_url()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builds_service_urls() {
        let settings = Settings::new("meeds.example/");
        assert_eq!(settings.portal_url(), "https://meeds.example/portal");
        assert_eq!(
            settings.hooks_url(),
            "https://meeds.example/portal/rest/gamification/connectors/github/hooks"
        );
        assert_eq!(
            settings.oauth_redirect_url(),
            "https://meeds.example/portal/githubAuth/callback"
        );
    }

    #[test]
    fn explicit_redirect_wins() {
        let mut settings = Settings::new("https://meeds.example");
        settings.redirect_url = Some("https://auth.example/cb".into());
        assert_eq!(settings.oauth_redirect_url(), "https://auth.example/cb");
    }

    #[test]
    fn empty_context_is_skipped() {
        let mut settings = Settings::new("http://localhost:8080");
        settings.portal_context = String::new();
        assert_eq!(settings.rest_url(), "http://localhost:8080/rest");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut settings = Settings::new("https://meeds.example");
        settings.session_cookie = Some("JSESSIONID=abc".into());
        settings.oauth_client_id = "98f2cb1bad3d5ab6ebb4".into();
        settings.save(Some(&path)).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn debug_output_hides_the_session_cookie() {
        let mut settings = Settings::new("https://meeds.example");
        settings.session_cookie = Some("JSESSIONID=abc".into());
        let printed = format!("{settings:?}");
        assert!(!printed.contains("JSESSIONID"));
        assert!(printed.contains("Secret(****)"));
    }

    #[test]
    fn bad_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(Settings::load(Some(&path)), Err(SettingsError::Parse { .. })));
    }
}
