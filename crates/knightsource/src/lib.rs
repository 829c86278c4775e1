//! KnightSource: campus benefit discovery for university students.
//!
//! The crate hosts the savings estimator, the JSON content library behind the
//! category pages, and the chat assistant, together with their HTTP routers
//! and the ambient configuration, telemetry, and error plumbing.

pub mod assistant;
pub mod config;
pub mod content;
pub mod error;
pub mod estimator;
pub mod telemetry;
