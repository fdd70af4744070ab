//! Roses and Thorns — a mood journaling app.
//!
//! Users record short notes tagged as a rose (something good) or a thorn
//! (something that stung), and review them on a calendar view with per-day
//! markers and a running tally. All non-UI logic lives in [`backend`].

pub mod backend;
