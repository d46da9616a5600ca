//! MiniBrowser — the non-rendering control core of a multi-tab browser shell.
//!
//! Tracks open page sessions, records bookmarks and history, observes live
//! network activity per page, and produces predictive address-bar
//! suggestions. Rendering engines plug in behind the [`engine::RenderEngine`]
//! trait; everything else runs on a single cooperative event loop.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod database;
pub mod engine;
pub mod event_loop;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
