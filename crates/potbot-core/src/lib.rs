//! Core domain + application logic for potbot.
//!
//! Framework-agnostic: Telegram and the price API live behind ports (traits)
//! implemented in adapter crates.

pub mod app;
pub mod chaos;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod poll;
pub mod ports;
pub mod pot;
pub mod stake;

pub use errors::{Error, Result};
