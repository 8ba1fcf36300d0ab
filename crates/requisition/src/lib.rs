//! Wire contract for equipment and supplies requisitions.
//!
//! This crate provides **wire models** and **format helpers** for the two payloads exchanged with
//! external requisition systems:
//! - the requisition request envelope, submitted by the requesting system
//! - the requisition response envelope, returned once the requisition has been adjudicated
//!
//! This crate focuses on:
//! - field-exact serialisation/deserialisation (JSON and YAML)
//! - strict decoding that names the failing path
//! - an opt-in conformance checker for the invariants the types cannot express
//!
//! It does not decide whether items are approved or denied, and it does not transport payloads.

pub mod codec;
pub mod conformance;
pub mod party;
pub mod request;
pub mod response;
pub mod status;

// Re-export facades
pub use codec::{RequisitionCodec, WireFormat};
pub use conformance::{Conformance, ConformanceReport, Finding};

// Re-export wire models
pub use party::{Owner, Party, Provider};
pub use request::{
    Address, ExtendedItemRequest, ItemRequest, Reception, Requisition, RequisitionRequest,
};
pub use response::{
    EquipmentAndSuppliesRequisition, EquipmentAndSuppliesRequisitionResponse, ItemResponse,
    RequisitionHeader, RequisitionResponse,
};
pub use status::AdjudicationStatus;

/// Errors returned by the `requisition` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum RequisitionError {
    /// A format name or status token outside the accepted set.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Trailing content after an otherwise complete JSON document.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Decoding or encoding failed. Schema mismatches carry the offending field path, e.g.
    /// `schema mismatch at requisition.items[0].quantity: ...`. YAML syntax errors land here too.
    #[error("translation error: {0}")]
    Translation(String),

    /// Conformance checks found problems while running in `enforce` mode.
    #[error("payload is not conformant: {0}")]
    Nonconformant(ConformanceReport),
}

/// Type alias for Results that can fail with a [`RequisitionError`].
pub type RequisitionResult<T> = Result<T, RequisitionError>;
