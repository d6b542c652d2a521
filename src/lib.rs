//! Client-side behavior for the portfolio page: nav highlighting, scroll
//! reveals, the contact form mailto hand-off, and the small widgets around
//! them.
//!
//! The modules at the top level are plain Rust and build on any target. The
//! `frontend` module binds them to the DOM and only exists on `wasm32`.

pub mod animation;
pub mod config;
pub mod contact;
pub mod error;
pub mod loading;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod telemetry;
pub mod theme;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use error::{InteractionError, Result};
