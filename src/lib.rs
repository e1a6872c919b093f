//! Lead intake: quiz wizard and contact relay for a marketing site.

pub mod api;
pub mod config;
pub mod contact;
pub mod error;
pub mod mail;
pub mod quiz;
