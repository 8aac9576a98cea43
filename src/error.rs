use thiserror::Error;

/// Errors surfaced by the editor context when a command cannot run
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaintError {
    /// The eyedropper control is disabled on this host
    #[error("the eyedropper is not available on this platform")]
    PickerUnavailable,
}

/// Result type for editor commands
pub type PaintResult<T> = Result<T, PaintError>;
