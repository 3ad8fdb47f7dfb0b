//! daybook - Calendar-organized journal data model
//!
//! An in-memory model for a personal journal: one [`domain::Day`] per
//! calendar date, grouped into [`domain::Month`]s, with categorized
//! annotations (tags, people, ...) and case-insensitive full-text search
//! that returns contextual snippets.
//!
//! Persistence, editing and calendar UI live outside this crate; they
//! construct months from loaded content and query or mutate days through
//! the types exported here.

pub mod domain;
pub mod error;

pub use error::DaybookError;
