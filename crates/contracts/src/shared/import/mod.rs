//! Client-side import pipeline core: static schemas, row validation and the
//! batch bookkeeping behind the preview table.

pub mod batch;
pub mod schema;
pub mod validator;
pub mod value;

pub use batch::{ImportBatch, ImportRow, OutcomeSummary};
pub use schema::{ColumnMapping, FieldKind, FieldRule, ImportSchema};
pub use validator::{parse_date, parse_number, validate_row, RawRow};
pub use value::FieldValue;
