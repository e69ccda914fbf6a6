use url::Url;

use crate::app::Settings;

pub const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const POPUP_WIDTH: i32 = 500;
pub const POPUP_HEIGHT: i32 = 600;

/// Size of the window the popup is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

/// Everything needed to open the OAuth authorize window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OauthPopup {
    pub url: Url,
    pub name: &'static str,
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl OauthPopup {
    /// Window feature string in the form accepted by `window.open`.
    pub fn features(&self) -> String {
        format!(
            "width={}, height={}, left={}, top={}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Something able to show the popup to the user.
pub trait PopupLauncher {
    fn open(&self, popup: &OauthPopup) -> std::io::Result<()>;
}

/// Static description of the GitHub account connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub logo: &'static str,
    pub rank: i32,
    pub profile_base_url: &'static str,
    pub client_id: String,
    pub redirect_url: String,
}

impl ConnectorDescriptor {
    pub fn github(settings: &Settings) -> Self {
        Self {
            name: "github",
            title: "githubConnector.label.profile",
            description: "githubConnector.label.description",
            icon: "fab fa-github",
            logo: "/gamification-github/skin/images/GitHub-Mark.png",
            rank: 10,
            profile_base_url: "https://github.com",
            client_id: settings.oauth_client_id.clone(),
            redirect_url: settings.oauth_redirect_url(),
        }
    }

    pub fn profile_url(&self, login: &str) -> String {
        format!("{}/{}", self.profile_base_url, login)
    }

    pub fn authorize_url(&self) -> Url {
        let mut url = Url::parse(GITHUB_AUTHORIZE_URL).expect("authorize url is valid");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url);
        url
    }

    /// Popup centered on `viewport`. The token exchange happens server side on
    /// the redirect URL.
    pub fn open_oauth_popup(&self, viewport: Viewport) -> OauthPopup {
        OauthPopup {
            url: self.authorize_url(),
            name: "Github OAuth",
            width: POPUP_WIDTH,
            height: POPUP_HEIGHT,
            left: viewport.width / 2 - POPUP_WIDTH / 2,
            top: viewport.height / 2 - POPUP_HEIGHT / 2,
        }
    }

    pub fn launch(&self, viewport: Viewport, launcher: &dyn PopupLauncher) -> std::io::Result<OauthPopup> {
        let popup = self.open_oauth_popup(viewport);
        log::debug!("opening {} at {}", popup.name, popup.features());
        launcher.open(&popup)?;
        Ok(popup)
    }
}
