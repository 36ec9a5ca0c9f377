pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use crate::app::AppState;
pub use crate::config::LinkerConfig;
pub use crate::core::{LinkManager, LinkOutcome, LinkRequest, LinkStatus};
pub use crate::error::{LinkError, Result};
