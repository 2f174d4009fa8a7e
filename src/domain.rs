//! Domain models for requirement extraction.
//!
//! This module contains the core types: extracted requirements and their
//! aggregate result, the classification vocabulary, recognized identifiers,
//! and validated extraction options.

mod options;
pub use options::Options;

/// Requirement identifier types and parsing.
pub mod req_id;
pub use req_id::{Error as ReqIdError, InvalidPrefixError, Prefix, ReqId};

/// The requirement classification vocabulary.
pub mod req_type;
pub use req_type::{CellPosition, ReqType};

/// Requirement records and extraction results.
pub mod requirement;
pub use requirement::{ExtractionResult, Requirement, WireError};

mod source_document;
pub use source_document::SourceDocument;
