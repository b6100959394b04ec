//! Core abstractions for diagram generation
//!
//! Errors, logging, configuration, shared text helpers and the traits every
//! renderer and transport encoder implements.

pub mod chumsky_utils;
mod config;
mod encoder;
mod error;
pub mod logging;
mod renderer;
mod text;

pub use config::*;
pub use encoder::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use text::*;
