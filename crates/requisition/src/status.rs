//! Adjudication status shared by request items and response headers.

use crate::RequisitionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of adjudicating a requisition or one of its items.
///
/// Wire values are exactly `APPROVED` and `DENIED`. No other value (including a lowercase
/// spelling) is accepted when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjudicationStatus {
    /// The requisition or item was approved.
    Approved,
    /// The requisition or item was denied.
    Denied,
}

impl AdjudicationStatus {
    /// Parses a status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionError::InvalidInput`] if `s` is not exactly `APPROVED` or `DENIED`.
    pub fn parse(s: &str) -> Result<Self, RequisitionError> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "DENIED" => Ok(Self::Denied),
            _ => Err(RequisitionError::InvalidInput(format!(
                "Invalid adjudication status: {s}"
            ))),
        }
    }

    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Denied => "DENIED",
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }
}

impl FromStr for AdjudicationStatus {
    type Err = RequisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AdjudicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
