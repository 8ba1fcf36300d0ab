//! Parties exchanging a requisition, and the provider it is billed against.
//!
//! A single [`Party`] type serves both roles (sender and destination). The role is carried by the
//! field name of the enclosing envelope, and flips between request and response.

use serde::{Deserialize, Serialize};

/// Organisation that owns a party.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Owner {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub code: String,
}

/// A system or site that sends or receives a requisition message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Party {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub code: String,
    pub owner: Owner,
}

/// Provider the requisition is placed under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Provider {
    pub name: String,
    pub number: String,
}
