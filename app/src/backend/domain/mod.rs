//! # Domain Module
//!
//! Contains all business logic for the journaling app.
//!
//! This module encapsulates the core rules that define how entries are
//! recorded and how the agenda view is computed. It operates independently
//! of any UI and of the specific storage or HTTP implementations.
//!
//! ## Module Organization
//!
//! - **calendar**: month grid generation, date math, and calendar navigation
//! - **agenda**: per-day entry markers and the rose/thorn tally
//! - **entry_service**: loading, ordering, creating, and capping entries
//! - **session_service**: sign-in state and remembered credentials
//! - **models**: boundary mapping between persisted records and domain
//!   entries
//!
//! ## Business Rules
//!
//! - Entry text is trimmed and must be non-empty
//! - Each entry is a rose or a thorn; nothing else reaches the domain
//! - The local collection keeps the 50 most recent entries, newest first
//! - The month grid is Monday-first; months are zero-indexed
//! - Markers are scoped to the viewed month; tallies never are

pub mod agenda;
pub mod calendar;
pub mod entry_service;
pub mod models;
pub mod session_service;

pub use calendar::CalendarService;
pub use entry_service::{EntryService, EntrySubmitter, MAX_RETAINED_ENTRIES};
pub use session_service::{AuthApi, SessionService};
