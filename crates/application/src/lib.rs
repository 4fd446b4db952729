//! Rootwalk Application Layer
//!
//! The iterative resolution engine and the lookup use case, written
//! against the transport port so any datagram transport can drive them.
pub mod ports;
pub mod services;
pub mod use_cases;
