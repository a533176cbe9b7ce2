pub mod aggregate;

pub use aggregate::{Coefficient, CoefficientDto, CoefficientPayload};
