//! Personnel form. The fonction list comes from the cached references.

mod model;
mod view;
mod view_model;

pub use view::PersonnelDetails;
