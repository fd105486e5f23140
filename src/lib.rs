//! Browser client for a per-user shopping list service.
//!
//! The session, api, list and view modules are plain Rust and run anywhere;
//! `app`, `components` and `hooks` are the yew front end that drives them in the browser.

pub mod api;
pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod data;
pub mod error;
pub mod hooks;
pub mod list;
pub mod response;
pub mod session;
pub mod util;
pub mod validate;
pub mod view;
