//! SR Triage Control - CLI client library
//!
//! Local classification, daemon submission/correction over HTTP, and
//! training-data helpers.

pub mod cli;
pub mod client;
pub mod commands;
pub mod errors;
pub mod output;
