//! # Driver's Friend Core
//!
//! Domain types, traits, and error definitions for the Driver's Friend
//! regulation assistant. This crate has **zero framework dependencies**: it
//! defines the domain model that the store, retriever, memory and resolver
//! crates implement against.
//!
//! ## Design Philosophy
//!
//! Every knowledge source is consumed through a narrow trait defined here.
//! Implementations live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/failing/hanging implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod knowledge;
pub mod language;
pub mod memory;
pub mod message;
pub mod regulation;
pub mod resolution;
pub mod retrieval;
pub mod store;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use error::{
    Error, MemoryError, Result, RetrievalError, StoreError, ValidationError,
};
pub use knowledge::KnowledgeEntry;
pub use language::Language;
pub use memory::ConversationStore;
pub use message::{ConversationMessage, Sender};
pub use regulation::Regulation;
pub use resolution::{ChatRequest, Intent, ResolutionResult, SearchOutcome};
pub use retrieval::{ContentRetriever, PassageBundle, RetrievedPassage};
pub use store::KnowledgeStore;
