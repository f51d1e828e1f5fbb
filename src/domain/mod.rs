//! Core domain types and logic.

pub mod config;
pub mod config_validation;
pub mod error;
pub mod stats;
pub mod trade;
