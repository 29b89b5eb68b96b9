//! # Portal Common Library
//!
//! Shared code for the institutional site services:
//! - Error and result types
//! - Bootstrap configuration loading
//! - Site language codes
//! - Content database initialization

pub mod config;
pub mod db;
pub mod error;
pub mod language;

pub use error::{Error, Result};
pub use language::Language;
