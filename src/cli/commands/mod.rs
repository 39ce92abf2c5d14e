//! CLI command implementations

pub mod utils;

pub mod add;
pub mod completions;
pub mod form;
pub mod init;
pub mod list;
pub mod material;
pub mod search;
