pub mod aggregate;

pub use aggregate::{looks_like_email, Personnel, PersonnelDto, PersonnelPayload};
