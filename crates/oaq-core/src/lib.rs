//! Resolve a free-text question into the single best-matching operation of
//! an OpenAPI document, and produce developer-facing artifacts for it.
//!
//! The document is loaded once into an immutable typed model; every
//! request-scoped function here is pure against it.

pub mod error;
pub mod rank;
pub mod refs;
pub mod resolve;
pub mod sample;
pub mod spec;
pub mod token;

pub use error::{LoadError, ResolveError};
pub use rank::{Candidate, Choice, find_candidates, score_operation};
pub use resolve::{
    OperationSummary, SamplePayload, SchemaBundle, curl_command, find_operation, operation_sample,
    operation_schemas, operation_summary,
};
pub use sample::sample_from_schema;
pub use spec::{ApiDocument, HttpMethod, from_json, load_document};
pub use token::tokenize;
