//! Core error type and logger shared by every relay component.

pub mod error;
pub mod logger;

pub use error::{RelayError, Result};
pub use logger::init_tracing;
