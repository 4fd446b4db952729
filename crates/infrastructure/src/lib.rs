//! Rootwalk Infrastructure Layer
//!
//! Socket and filesystem adapters for the application ports.
pub mod dns;
pub mod system;
