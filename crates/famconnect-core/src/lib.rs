//! Core FamilyConnect library (config, stores, session, auth, navigation).

pub mod auth;
pub mod config;
pub mod context;
pub mod logging;
pub mod prefs;
pub mod secrets;
pub mod session;
pub mod shell;

pub use context::AppContext;
