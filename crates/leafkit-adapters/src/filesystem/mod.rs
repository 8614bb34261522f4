//! Filesystem adapters.
//!
//! Both adapters implement [`Filesystem`](leafkit_core::application::ports::Filesystem)
//! and [`FileMaterializer`](leafkit_core::application::ports::FileMaterializer),
//! so one value can be handed to the core for both ports.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
