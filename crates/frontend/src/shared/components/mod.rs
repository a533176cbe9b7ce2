pub mod form_field;
pub mod reference_select;
pub mod stat_card;
pub mod table_checkbox;

pub use form_field::TextField;
pub use reference_select::ReferenceSelect;
pub use stat_card::{CardTone, StatCard};
pub use table_checkbox::TableCheckbox;
