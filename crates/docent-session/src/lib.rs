//! # docent-session
//!
//! Per-session documents and search indexes.
//!
//! ## Modules
//!
//! - `chunking`: character-window chunker
//! - `index`: `SessionIndex` and the `IndexBuilder` that produces it
//! - `store`: `SessionStore` with `DashMap` for concurrent access, atomic
//!   index swap and TTL cleanup

pub mod chunking;
pub mod index;
pub mod store;

pub use chunking::chunk_text;
pub use index::{IndexBuilder, IndexOptions, SessionIndex};
pub use store::{SessionSnapshot, SessionStore};
