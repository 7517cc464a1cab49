//! Whole-document question store for Responder.
//!
//! Questions, each with an embedded list of answers, live in a single JSON
//! document. Every operation of [`QuestionStore`] reads the full document;
//! every mutation writes the full document back.
//!
//! # Result Shapes
//!
//! - [`Lookup`] -- a lookup that may find nothing; absence serializes as `{}`
//! - [`Outcome`] -- an operation that may be rejected; a [`Rejection`]
//!   serializes as `{"error": "..."}`
//! - [`StoreError`] -- storage and parse faults, which propagate
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStorage`] trait:
//!
//! - [`FileDocumentStorage`] -- JSON file, replaced whole on every save
//! - [`InMemoryDocumentStorage`] -- document text held in memory, for tests and embedding
//!
//! # Design Rules
//!
//! 1. No caching across calls: each operation loads fresh.
//! 2. Validation is presence of `author` and `summary`, nothing more.
//! 3. Rejected mutations never write.
//! 4. Identifiers are random UUIDs assigned by the store; caller ids are overwritten.
//! 5. No locking: concurrent mutations are last-writer-wins.

pub mod error;
pub mod file;
pub mod memory;
pub mod model;
pub mod outcome;
pub mod repository;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileDocumentStorage;
pub use memory::InMemoryDocumentStorage;
pub use model::{
    generate_id, is_complete, Answer, AnswerDraft, Document, Draft, ExtraFields, NewAnswer,
    NewQuestion, Question, QuestionDraft,
};
pub use outcome::{Lookup, Outcome, Rejection};
pub use repository::QuestionStore;
pub use traits::DocumentStorage;
