// File: crates/tgph-format/src/lib.rs
// Summary: Library entry point; exports the wire model, decoder/encoder and container store.

pub mod container;
pub mod document;
pub mod error;
pub mod store;

pub use container::{Container, ElementArray, ElementType};
pub use document::{Tgph, MAGIC, VERSION};
pub use error::FormatError;
pub use store::{ContainerStore, LookupError};
