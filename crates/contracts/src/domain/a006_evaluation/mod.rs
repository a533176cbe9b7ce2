pub mod aggregate;

pub use aggregate::{Evaluation, EvaluationChoices, EvaluationDto, EvaluationPayload, DEFAULT_NOTE_SUR};
