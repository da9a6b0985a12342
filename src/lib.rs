pub mod config;
pub mod draft;
pub mod error;
pub mod format;
pub mod geo;
pub mod history;
pub mod models;
pub mod preview;
pub mod providers;
pub mod session;
