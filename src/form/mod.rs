//! Field classification and fill orchestration.
//!
//! The core is synchronous and talks to the page only through
//! [`FormDocument`], so it runs the same against a live page snapshot or an
//! in-memory document.

pub mod classifier;
pub mod document;
pub mod field;
pub mod filler;
pub mod generator;

pub use classifier::{classify, classify_signature, Category};
pub use document::{FieldEvent, FillOp, FormDocument, FormSnapshot};
pub use field::{enumerate_candidates, Field, FieldHandle};
pub use filler::{execute, FillReport, FilledField, FormFiller};
pub use generator::{PhoneFormat, ValueGenerator, ValueKind};
