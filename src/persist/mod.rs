//! Persistence: plain documents, their encoding, and where they are kept.
//!
//! ## Key Types
//!
//! - `Document`: behaviour-free snapshot of a `Game`
//! - `SavedGame`: a document plus its undo history
//! - `SaveStore`: opaque key to blob storage supplied by the host
//! - `PersistError`: every way loading can fail

pub mod document;
pub mod error;
pub mod store;

pub use document::{Document, PileDocument, SavedGame, VERSION};
pub use error::PersistError;
pub use store::{MemoryStore, SaveStore};
