//! GitHub connector for the portal gamification engine.
//!
//! [`api::HooksClient`] manages the organization webhooks that feed GitHub
//! activity into gamification. [`connector`] describes the account connector
//! and its OAuth popup, [`extensions`] the UI contributions, and [`bootstrap`]
//! wires them together once locale resources are loaded.

pub mod api;
pub mod app;
pub mod bootstrap;
pub mod connector;
pub mod extensions;
pub mod i18n;
pub mod ui;
pub mod utils;

pub use api::{ApiError, HooksClient};
pub use app::Settings;
