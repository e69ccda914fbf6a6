use std::fmt;
use std::str::FromStr;

/// GitHub actions the gamification engine knows how to reward.
///
/// The string forms are the labels used on the wire, including the historical
/// `creatPullRequest` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GithubAction {
    CommentPullRequest,
    CreatePullRequest,
    ReviewPullRequest,
    PullRequestValidated,
    PushCode,
    CreateIssue,
    CloseIssue,
    CommentIssue,
    AddIssueLabel,
    DeleteIssueLabel,
}

impl GithubAction {
    pub const ALL: [GithubAction; 10] = [
        GithubAction::CommentPullRequest,
        GithubAction::CreatePullRequest,
        GithubAction::ReviewPullRequest,
        GithubAction::PullRequestValidated,
        GithubAction::PushCode,
        GithubAction::CreateIssue,
        GithubAction::CloseIssue,
        GithubAction::CommentIssue,
        GithubAction::AddIssueLabel,
        GithubAction::DeleteIssueLabel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GithubAction::CommentPullRequest => "commentPullRequest",
            GithubAction::CreatePullRequest => "creatPullRequest",
            GithubAction::ReviewPullRequest => "reviewPullRequest",
            GithubAction::PullRequestValidated => "pullRequestValidated",
            GithubAction::PushCode => "pushCode",
            GithubAction::CreateIssue => "createIssue",
            GithubAction::CloseIssue => "closeIssue",
            GithubAction::CommentIssue => "commentIssue",
            GithubAction::AddIssueLabel => "addIssueLabel",
            GithubAction::DeleteIssueLabel => "deleteIssueLabel",
        }
    }

    /// GitHub webhook event that carries this action.
    pub fn github_event(self) -> &'static str {
        match self {
            GithubAction::CommentPullRequest => "pull_request_review_comment",
            GithubAction::CreatePullRequest | GithubAction::PullRequestValidated => "pull_request",
            GithubAction::ReviewPullRequest => "pull_request_review",
            GithubAction::PushCode => "push",
            GithubAction::CreateIssue
            | GithubAction::CloseIssue
            | GithubAction::AddIssueLabel
            | GithubAction::DeleteIssueLabel => "issues",
            GithubAction::CommentIssue => "issue_comment",
        }
    }

    pub fn is_known_label(label: &str) -> bool {
        Self::ALL.iter().any(|a| a.label() == label)
    }
}

impl fmt::Display for GithubAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown github action label: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for GithubAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.label() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
