pub mod api;
pub mod components;
pub mod config;
pub mod crud;
pub mod date_utils;
pub mod dialogs;
pub mod dual_list;
pub mod excel_importer;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod picker_aggregate;
pub mod references;
