//! Classe details (MVVM):
//! - model.rs: API calls
//! - view_model.rs: form signals and commands
//! - view.rs: component

mod model;
mod view;
mod view_model;

pub use view::ClasseDetails;
pub use view_model::ClasseDetailsViewModel;
