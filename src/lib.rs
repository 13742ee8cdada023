//! Terminal wall of labelled notes laid out in balanced columns.

pub mod app;
pub mod config;
pub mod credentials;
pub mod input;
pub mod logging;
pub mod note;
pub mod session;
pub mod store;
pub mod ui;
