pub mod export;
pub mod flow;
pub mod parser;
pub mod types;
pub mod widget;

pub use flow::{FlowError, FlowState, ImportFlow};
pub use types::{ParseError, ParsedSheet, SheetRow};
pub use widget::ImportWidget;
