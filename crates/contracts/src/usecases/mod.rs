pub mod common;
pub mod u501_import_eleves;
pub mod u502_import_notes;
pub mod u503_affectation_eleves;
pub mod u504_affectation_professeurs;
