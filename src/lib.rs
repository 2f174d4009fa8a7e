//! Requirement extraction from wiki page tables.
//!
//! Wiki pages that hold requirements in tables are turned into ordered,
//! classified requirement records suitable for tabular review. The engine
//! is handed the raw page body by an upstream fetch collaborator; it
//! performs no network access and keeps no state across requests.

pub mod domain;
pub use domain::{
    ExtractionResult, Options, Prefix, ReqId, ReqType, Requirement, SourceDocument,
};

/// The extraction pipeline: tokenizer, normalizer, and assembler.
pub mod extract;
pub use extract::Engine;

pub mod request;
pub use request::Request;
