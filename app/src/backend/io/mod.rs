//! # IO Module
//!
//! Everything that talks to the outside world: the HTTP client for the
//! remote journaling API, and the terminal rendering of the agenda view.

pub mod client;
pub mod display;

pub use client::{ApiClient, ApiError, DEFAULT_API_BASE};
pub use display::render_agenda;
