//! Validated primitive types shared by the requisition crates.
//!
//! Wire models keep plain `String` fields so that payloads round-trip exactly. These types are
//! used when a decoded value is checked against an expectation the wire schema cannot express.

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The conformance checker uses it to decide whether a correlation identifier
/// (tracking id, assignment id, reference number) carries a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be viewed as a string slice
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` holding the input with leading and trailing whitespace
    /// removed, or `Err(TextError::Empty)` if nothing remains after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
