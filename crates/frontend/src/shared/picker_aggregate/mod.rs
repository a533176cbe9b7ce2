//! Single-item picker over a table of `TableDisplayable` items.
//!
//! ```rust,ignore
//! view! {
//!     <GenericAggregatePicker
//!         items=items_signal
//!         initial_selected_id=None
//!         on_confirm=|item| { /* ... */ }
//!         on_cancel=|_| { /* ... */ }
//!     />
//! }
//! ```

pub mod component;
pub mod traits;

pub use component::GenericAggregatePicker;
pub use traits::{AggregatePickerResult, TableDisplayable};
