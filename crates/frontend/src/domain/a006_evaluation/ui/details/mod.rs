//! Evaluation form (MVVM). Classes and matières are loaded as choices,
//! types from the references, periods from the current context.

mod model;
mod view;
mod view_model;

pub use view::EvaluationDetails;
