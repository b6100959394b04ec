//! Plugin implementations
//!
//! The class diagram plugin builds and renders the model; the transport
//! plugin turns diagram text into artifacts; the orchestrator runs both.

pub mod class;
pub mod orchestrator;
pub mod transport;

pub use class::*;
pub use orchestrator::*;
pub use transport::*;
