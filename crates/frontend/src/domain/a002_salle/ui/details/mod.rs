mod model;
mod view;
mod view_model;

pub use view::SalleDetails;
pub use view_model::SalleDetailsViewModel;
