//! Data models for the application
//!
//! Records mirror the wire shape of the spreadsheet collaborator, which uses
//! camelCase field names and uppercase media-kind tokens.

mod upload;

pub use upload::*;
