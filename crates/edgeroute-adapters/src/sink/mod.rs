//! Document sinks.

mod local;
mod memory;

pub use local::LocalDocumentSink;
pub use memory::MemoryDocumentSink;
