//! Dispatcher integration tests.
//!
//! Every test drives a real [`herald::Dispatcher`] against the recording
//! `MockTransport`.

pub mod common;
pub mod help_menu_test;
pub mod notices_test;
pub mod slash_test;
