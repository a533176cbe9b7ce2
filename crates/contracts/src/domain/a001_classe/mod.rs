pub mod aggregate;

pub use aggregate::{Classe, ClasseDto, ClassePayload};
