//! Herald - a chat-bot command router.
//!
//! This library exposes the core modules for the binary and integration tests.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod session;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::{BotError, Result};
