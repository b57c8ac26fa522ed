//! Quick Define: select a word in the browser, open it in your dictionaries.
//!
//! This library crate holds the background-service logic (settings store, tab
//! and context-menu orchestration, request dispatch) for use by the host
//! binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod dispatcher;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
