mod dashboard;

pub use dashboard::TableauDeBord;
