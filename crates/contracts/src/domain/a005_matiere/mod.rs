pub mod aggregate;

pub use aggregate::{Matiere, MatiereDto};
