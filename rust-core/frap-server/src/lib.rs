//! # Frap Server
//!
//! Configuration, logging and the demo site served by the `frap-server`
//! binary.

pub mod config;
pub mod logging;
pub mod site;

pub use config::{ConfigError, FrapConfig};
pub use logging::init_tracing;
pub use site::Site;
