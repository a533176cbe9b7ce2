//! Tab plumbing: `registry` maps a tab key to its screen, `tab_labels`
//! gives its title.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
