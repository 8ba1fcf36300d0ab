use requisition::RequisitionError;

/// Errors raised by the requisition service layer.
///
/// Payload problems come through unchanged as [`CoreError::Requisition`]; the remaining
/// variants cover configuration values and file access around the codec.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A configuration or caller-supplied value could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The payload file could not be read.
    #[error("failed to read requisition file: {0}")]
    FileRead(std::io::Error),
    /// The payload file, or its parent directory, could not be written.
    #[error("failed to write requisition file: {0}")]
    FileWrite(std::io::Error),
    #[error(transparent)]
    Requisition(#[from] RequisitionError),
}

/// Result type for service-layer operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
