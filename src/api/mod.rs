pub mod client;
pub mod error;
pub mod events;
pub mod form;
pub mod models;

pub use client::HooksClient;
pub use error::{ApiError, Operation};
pub use models::{NewWebHook, Page, Pagination, Repository, Secret, TokenStatus, WebHook};
