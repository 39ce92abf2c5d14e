//! Form controller and the notices it produces
//!
//! The controller owns an [`AppState`] and turns each user action into a
//! [`Notice`]. It knows nothing about terminals; the CLI renders notices.

pub mod controller;
pub mod notice;

pub use controller::{AppState, FormController, FormError, FormFields};
pub use notice::{Notice, NoticeLevel};
