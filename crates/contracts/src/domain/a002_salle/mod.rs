pub mod aggregate;

pub use aggregate::{Salle, SalleDto};
