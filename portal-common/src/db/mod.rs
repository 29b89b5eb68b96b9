//! Content database access shared by portal services

pub mod init;

pub use init::{create_content_schema, init_database, SITE_SECTIONS};
