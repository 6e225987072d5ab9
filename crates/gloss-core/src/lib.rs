//! Gloss Core Library
//!
//! Core domain logic for the gloss definition tool: term extraction,
//! definition resolution against the MediaWiki API, extract cleanup,
//! and document mutation.

pub mod cache;
pub mod config;
pub mod document;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod format;
pub mod formatter;
pub mod logging;
pub mod mutate;
pub mod resolver;
pub mod terms;
