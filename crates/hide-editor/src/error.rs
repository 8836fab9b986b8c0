use thiserror::Error;

use crate::step::EditorStep;

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("Cannot save while {step}; finish tracing first")]
    NotFinished { step: EditorStep },

    #[error("Invalid surface: {width} x {height} must be finite and positive")]
    InvalidSurface { width: f64, height: f64 },
}
