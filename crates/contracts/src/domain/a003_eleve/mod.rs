pub mod aggregate;

pub use aggregate::{Eleve, EleveDto, ElevePayload};
