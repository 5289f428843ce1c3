//! Export collaborators: package writers and generic context data.

mod helper;
mod writer;

pub use helper::{ActivityContextHelper, ContextHelper};
pub use writer::{DirectoryWriter, ExportWriter, ExportedFile, ExportedRecord, MemoryWriter};
