// Re-export the wire types so callers only need shiftdesk_core::*
pub use shiftdesk_protocol as protocol;

// Internal Modules
pub mod api;
pub mod auth;
pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod directory;
pub mod display;
pub mod error;
pub mod forms;
pub mod notify;
pub mod password;
pub mod session;

mod util;
