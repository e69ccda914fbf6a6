use reqwest::StatusCode;

/// Which client call failed. Each one owns the generic text shown to the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListWebHooks,
    GetWebHook,
    SaveWebHook,
    UpdateAccessToken,
    DeleteWebHook,
    ListRepositories,
    SetRepositoryStatus,
    SetWatchScope,
    SetEventStatus,
    ForceRefresh,
    LoadLocale,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListWebHooks => "Error when getting github webhooks",
            Operation::GetWebHook => "Error when getting github webhook",
            Operation::SaveWebHook => "Error when saving github webhook",
            Operation::UpdateAccessToken => "Error when updating github webhook access token",
            Operation::DeleteWebHook => "Error when deleting github webhook",
            Operation::ListRepositories => "Error when getting github webhook repositories",
            Operation::SetRepositoryStatus
            | Operation::SetWatchScope
            | Operation::SetEventStatus => "Response code indicates a server error",
            Operation::ForceRefresh => "Error when updating github webhooks",
            Operation::LoadLocale => "Error when loading locale resources",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Transport failure or non-success status. Detail is deliberately dropped.
    #[error("{}", .operation.failure_message())]
    Request {
        operation: Operation,
        status: Option<StatusCode>,
    },
    /// Backend refused a webhook creation and explained why.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{}: {source}", .operation.failure_message())]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid session cookie: {0}")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub(crate) fn request(operation: Operation, status: Option<StatusCode>) -> Self {
        ApiError::Request { operation, status }
    }

    /// HTTP status the backend answered with, when the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Request { status, .. } => *status,
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
