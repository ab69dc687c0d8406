//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>` instead of reaching for a global
//! logger, so tests can silence them and hosts can pick a sink.

mod traits;
mod noop;
mod tracing_logger;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use tracing_logger::TracingLogger;
