//! pentestgpt-core: LLM-assisted penetration testing companion library

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod connection;
pub mod error;
pub mod providers;
pub mod session;

pub use error::{Error, Result};
