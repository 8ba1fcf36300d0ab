//! Requisition response wire models.
//!
//! The response envelope ([`RequisitionResponse`]) is returned once a requisition has been
//! adjudicated. Its own fields use PascalCase wire names; the embedded [`Party`] values keep the
//! lowercase names they have in the request.
//!
//! Notes:
//! - `Sender` in the response is the request's `destination`, and `Destination` is the
//!   request's `sender`
//! - `Quantity` is text, unlike the request's numeric `quantity`, and is passed through as-is

use crate::party::Party;
use crate::request::RequisitionRequest;
use crate::status::AdjudicationStatus;
use crate::RequisitionResult;
use serde::{Deserialize, Serialize};

/// Summary of the adjudicated requisition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RequisitionHeader {
    pub external_system_id: String,
    pub external_reference_number: String,
    pub requisition_guid: String,
    pub requisition_number: String,
    pub requisition_status_code: AdjudicationStatus,

    /// Human-readable status.
    pub requisition_status: String,

    pub approved_by_staff_name: String,

    /// ISO 8601 date of the decision.
    pub approved_date: String,
}

/// Per-line adjudication result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ItemResponse {
    pub external_reference_number: String,
    pub master_item_guid: String,
    pub master_item_code: String,
    pub master_item_desc: String,
    pub line_item_guid: String,
    pub line_item_number: String,
    pub item_type_code: String,
    pub item_type: String,
    pub item_unit: String,
    pub quantity: String,
    pub additional_information: String,

    /// Status code as sent by the adjudicating system. See [`ItemResponse::status`].
    pub line_item_status_code: String,

    pub line_item_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial_reason_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial_reason: Option<String>,
}

impl ItemResponse {
    /// Parses `LineItemStatusCode` as an [`AdjudicationStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::RequisitionError::InvalidInput`] if the code is neither `APPROVED` nor
    /// `DENIED`.
    pub fn status(&self) -> RequisitionResult<AdjudicationStatus> {
        AdjudicationStatus::parse(&self.line_item_status_code)
    }

    pub fn has_denial_details(&self) -> bool {
        self.denial_reason.is_some() || self.denial_reason_code.is_some()
    }
}

/// The adjudicated requisition: header plus ordered line items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EquipmentAndSuppliesRequisition {
    pub requisition_header: RequisitionHeader,

    #[serde(rename = "LineItem")]
    pub line_items: Vec<ItemResponse>,
}

/// Body of the response envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct EquipmentAndSuppliesRequisitionResponse {
    pub sender: Party,

    #[serde(rename = "MessageTrackingID")]
    pub message_tracking_id: String,

    pub service_assignment_id: String,
    pub equipment_and_supplies_requisition: EquipmentAndSuppliesRequisition,
    pub destination: Party,
}

impl EquipmentAndSuppliesRequisitionResponse {
    /// Builds the response to `request`.
    ///
    /// Tracking and assignment identifiers are copied from the request. The request's
    /// `destination` becomes the response `Sender` and the request's `sender` becomes the
    /// response `Destination`.
    pub fn reply_to(
        request: &RequisitionRequest,
        requisition: EquipmentAndSuppliesRequisition,
    ) -> Self {
        Self {
            sender: request.destination.clone(),
            message_tracking_id: request.message_tracking_id.clone(),
            service_assignment_id: request.service_assignment_id.clone(),
            equipment_and_supplies_requisition: requisition,
            destination: request.sender.clone(),
        }
    }
}

/// Outer envelope of a requisition response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RequisitionResponse {
    pub equipment_and_supplies_requisition_response: EquipmentAndSuppliesRequisitionResponse,
}

impl RequisitionResponse {
    pub fn new(body: EquipmentAndSuppliesRequisitionResponse) -> Self {
        Self {
            equipment_and_supplies_requisition_response: body,
        }
    }

    pub fn body(&self) -> &EquipmentAndSuppliesRequisitionResponse {
        &self.equipment_and_supplies_requisition_response
    }

    pub fn header(&self) -> &RequisitionHeader {
        &self.body().equipment_and_supplies_requisition.requisition_header
    }

    pub fn line_items(&self) -> &[ItemResponse] {
        &self.body().equipment_and_supplies_requisition.line_items
    }
}
