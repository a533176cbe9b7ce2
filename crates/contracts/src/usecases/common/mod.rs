//! Types shared by all use cases.
//!
//! The bulk import and affectation response shape is the server's contract;
//! it lives here only, so it can be checked against the live API in one place.

pub mod bulk;
pub mod usecase_metadata;

pub use bulk::{BulkImportRequest, BulkImportResponse, ImportPayloadRow, RowOutcome};
pub use usecase_metadata::UseCaseMetadata;
