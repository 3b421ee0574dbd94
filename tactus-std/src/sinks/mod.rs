//! Standard notification sinks.

pub mod logging;

pub use logging::LoggingSink;
