//! Stockroom: inventory entry tool
//!
//! Records product entries (name, quantity, material type) into a
//! spreadsheet file and keeps a user-editable list of material types in a
//! plain text file.

pub mod cli;
pub mod core;
pub mod entities;
pub mod form;
pub mod logging;
