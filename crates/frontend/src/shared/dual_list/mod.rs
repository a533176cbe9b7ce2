pub mod component;
pub mod state;

pub use component::DualList;
pub use state::{DualListState, Side};
