//! Contributions of this connector to the host application.
//!
//! The host owns an [`ExtensionRegistry`] and passes it to [`register_github`]
//! at startup; nothing is registered through global state.

use crate::api::events::GithubAction;

pub const CONNECTORS_POINT: &str = "engagementCenterConnectors";
pub const ACTIONS_POINT: &str = "engagementCenterActions";
pub const ADMIN_POINT: &str = "GitHubWebHookManagementApp";

pub const LOCALE_BUNDLE: &str = "locale.portlet.GitHubWebHookManagement";

/// Action labels rendered by the GitHub action renderer.
pub fn github_user_actions() -> impl Iterator<Item = &'static str> {
    GithubAction::ALL.into_iter().map(GithubAction::label)
}

pub fn is_github_action(label: &str) -> bool {
    GithubAction::is_known_label(label)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorEntry {
    pub name: &'static str,
    pub icon: &'static str,
    pub icon_color_class: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action_label: &'static str,
}

impl ConnectorEntry {
    /// Locale bundle the host must load before showing the connector.
    pub fn init(&self, language: &str) -> String {
        format!("/gamification-github/i18n/{LOCALE_BUNDLE}?lang={language}")
    }
}

#[derive(Clone, Copy)]
pub struct ActionRenderer {
    pub icon: &'static str,
    pub icon_color_class: &'static str,
    pub matcher: fn(&str) -> bool,
    pub label: fn(&str) -> String,
}

impl ActionRenderer {
    pub fn matches(&self, action_label: &str) -> bool {
        (self.matcher)(action_label)
    }

    pub fn label(&self, action_label: &str) -> String {
        (self.label)(action_label)
    }
}

impl std::fmt::Debug for ActionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRenderer")
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum ExtensionKind {
    Connector(ConnectorEntry),
    ActionRenderer(ActionRenderer),
    AdminPanel { component: &'static str },
}

#[derive(Debug, Clone)]
pub struct Extension {
    pub point: &'static str,
    pub key: &'static str,
    pub id: &'static str,
    pub rank: i32,
    pub kind: ExtensionKind,
}

#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Extension>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, extension: Extension) {
        log::debug!(
            "registering extension {} at {}/{} (rank {})",
            extension.id,
            extension.point,
            extension.key,
            extension.rank
        );
        self.extensions.push(extension);
    }

    /// Registrations for `point`, lowest rank first. Ties keep registration order.
    pub fn resolve(&self, point: &str) -> Vec<&Extension> {
        let mut found: Vec<&Extension> = self.extensions.iter().filter(|e| e.point == point).collect();
        found.sort_by_key(|e| e.rank);
        found
    }

    /// First action renderer, by rank, that accepts `action_label`.
    pub fn renderer_for(&self, action_label: &str) -> Option<(&Extension, &ActionRenderer)> {
        self.resolve(ACTIONS_POINT).into_iter().find_map(|ext| match &ext.kind {
            ExtensionKind::ActionRenderer(r) if r.matches(action_label) => Some((ext, r)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Adds the connector list entry, the action renderer and the admin panel.
pub fn register_github(registry: &mut ExtensionRegistry) {
    registry.register(Extension {
        point: CONNECTORS_POINT,
        key: "connector-extensions",
        id: "github",
        rank: 20,
        kind: ExtensionKind::Connector(ConnectorEntry {
            name: "github",
            icon: "fab fa-github",
            icon_color_class: "text-color",
            title: "Github",
            description: "githubConnector.admin.label.description",
            action_label: "githubConnector.action.form.label",
        }),
    });
    registry.register(Extension {
        point: ACTIONS_POINT,
        key: "user-actions",
        id: "github",
        rank: 60,
        kind: ExtensionKind::ActionRenderer(ActionRenderer {
            icon: "fab fa-github",
            icon_color_class: "text-color",
            matcher: is_github_action,
            label: |_| String::new(),
        }),
    });
    registry.register(Extension {
        point: ADMIN_POINT,
        key: "admin-panel",
        id: "github-webhook-management",
        rank: 10,
        kind: ExtensionKind::AdminPanel {
            component: "github-webhook-management-app",
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(rank: i32, id: &'static str, matcher: fn(&str) -> bool) -> Extension {
        Extension {
            point: ACTIONS_POINT,
            key: "user-actions",
            id,
            rank,
            kind: ExtensionKind::ActionRenderer(ActionRenderer {
                icon: "",
                icon_color_class: "",
                matcher,
                label: |l| l.to_string(),
            }),
        }
    }

    #[test]
    fn matcher_accepts_only_the_allow_list() {
        for label in github_user_actions() {
            assert!(is_github_action(label), "{label}");
        }
        assert!(is_github_action("creatPullRequest"));
        assert!(!is_github_action(""));
        assert!(!is_github_action("PushCode"));
        assert!(!is_github_action("pushcode"));
        assert!(!is_github_action("createPullRequest"));
        assert!(!is_github_action("likeActivity"));
    }

    #[test]
    fn github_registrations() {
        let mut registry = ExtensionRegistry::new();
        register_github(&mut registry);
        assert_eq!(registry.len(), 3);

        let (ext, r) = registry.renderer_for("pushCode").unwrap();
        assert_eq!(ext.rank, 60);
        assert_eq!(r.label("pushCode"), "");
        assert!(registry.renderer_for("likeActivity").is_none());

        let connectors = registry.resolve(CONNECTORS_POINT);
        match &connectors[0].kind {
            ExtensionKind::Connector(entry) => assert_eq!(
                entry.init("fr"),
                "/gamification-github/i18n/locale.portlet.GitHubWebHookManagement?lang=fr"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resolve_is_a_stable_rank_sort() {
        let mut registry = ExtensionRegistry::new();
        registry.register(renderer(50, "b", |_| true));
        registry.register(renderer(10, "a", |_| false));
        registry.register(renderer(50, "c", |_| true));
        let ids: Vec<_> = registry.resolve(ACTIONS_POINT).iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(registry.resolve(CONNECTORS_POINT).is_empty());
    }

    #[test]
    fn lower_rank_renderer_wins() {
        let mut registry = ExtensionRegistry::new();
        register_github(&mut registry);
        registry.register(renderer(5, "override", |l| l == "pushCode"));
        assert_eq!(registry.renderer_for("pushCode").unwrap().0.id, "override");
        assert_eq!(registry.renderer_for("createIssue").unwrap().0.id, "github");
    }
}
