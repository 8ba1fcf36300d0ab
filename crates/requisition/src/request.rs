//! Requisition request wire models.
//!
//! The request envelope ([`RequisitionRequest`]) is produced by the requesting system. Field
//! names are the exact snake_case wire names, except on [`ExtendedItemRequest`] where the
//! adjudication fields use camelCase.
//!
//! Notes:
//! - Dates are carried as ISO 8601 text and are not reformatted on the way through
//! - `quantity` is numeric here but textual in the response (see [`crate::ItemResponse`])

use crate::party::{Party, Provider};
use crate::status::AdjudicationStatus;
use serde::{Deserialize, Serialize};

/// Postal address used for delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub postal_code: String,
    pub street_name: String,
    pub city: String,
    pub street_number: String,
    pub province: String,
    pub country: String,
}

/// Delivery instructions for a requisition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reception {
    /// Reception type, for example `HOME`.
    #[serde(rename = "type")]
    pub kind: String,

    /// When the delivery should be received (ISO 8601).
    pub receive_at: String,

    pub instructions: String,
    pub address: Address,
}

/// One requested line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRequest {
    pub external_reference_number: String,

    /// Requested quantity; expected to be positive.
    #[serde(with = "quantity")]
    pub quantity: f64,

    pub additional_information: String,

    /// Link to the master item catalog.
    pub master_item_guid: String,

    pub external_system_id: String,
}

/// An item request carrying its adjudication outcome.
///
/// `denialReason` and `denialReasonCode` are only meaningful when `status` is
/// [`AdjudicationStatus::Denied`]. The type does not enforce this; use the constructors
/// ([`ExtendedItemRequest::approved`], [`ExtendedItemRequest::denied`]) or run
/// [`crate::Conformance::check_extended_item`] on decoded values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtendedItemRequest {
    pub external_reference_number: String,
    #[serde(with = "quantity")]
    pub quantity: f64,
    pub additional_information: String,
    pub master_item_guid: String,
    pub external_system_id: String,

    pub status: AdjudicationStatus,

    #[serde(rename = "isReplacement")]
    pub is_replacement: bool,

    #[serde(rename = "masterItemDesc")]
    pub master_item_desc: String,

    #[serde(rename = "masterItemCode")]
    pub master_item_code: String,

    #[serde(
        rename = "denialReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub denial_reason: Option<String>,

    #[serde(
        rename = "denialReasonCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub denial_reason_code: Option<String>,
}

impl ExtendedItemRequest {
    /// Builds an approved item. Denial fields are left absent.
    pub fn approved(
        item: ItemRequest,
        master_item_code: impl Into<String>,
        master_item_desc: impl Into<String>,
        is_replacement: bool,
    ) -> Self {
        Self::from_item(
            item,
            AdjudicationStatus::Approved,
            master_item_code.into(),
            master_item_desc.into(),
            is_replacement,
        )
    }

    /// Builds a denied item with its denial reason and code.
    pub fn denied(
        item: ItemRequest,
        master_item_code: impl Into<String>,
        master_item_desc: impl Into<String>,
        is_replacement: bool,
        denial_reason_code: impl Into<String>,
        denial_reason: impl Into<String>,
    ) -> Self {
        let mut extended = Self::from_item(
            item,
            AdjudicationStatus::Denied,
            master_item_code.into(),
            master_item_desc.into(),
            is_replacement,
        );
        extended.denial_reason_code = Some(denial_reason_code.into());
        extended.denial_reason = Some(denial_reason.into());
        extended
    }

    fn from_item(
        item: ItemRequest,
        status: AdjudicationStatus,
        master_item_code: String,
        master_item_desc: String,
        is_replacement: bool,
    ) -> Self {
        Self {
            external_reference_number: item.external_reference_number,
            quantity: item.quantity,
            additional_information: item.additional_information,
            master_item_guid: item.master_item_guid,
            external_system_id: item.external_system_id,
            status,
            is_replacement,
            master_item_desc,
            master_item_code,
            denial_reason: None,
            denial_reason_code: None,
        }
    }

    /// Returns the underlying item request without its adjudication fields.
    pub fn item(&self) -> ItemRequest {
        ItemRequest {
            external_reference_number: self.external_reference_number.clone(),
            quantity: self.quantity,
            additional_information: self.additional_information.clone(),
            master_item_guid: self.master_item_guid.clone(),
            external_system_id: self.external_system_id.clone(),
        }
    }

    /// Whether any denial field is present.
    pub fn has_denial_details(&self) -> bool {
        self.denial_reason.is_some() || self.denial_reason_code.is_some()
    }
}

/// The requisition body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requisition {
    pub external_reference_number: String,

    /// Requested items, in display order. Expected to be non-empty.
    pub items: Vec<ItemRequest>,

    pub reception: Reception,

    /// Date the requisition was raised in the external system (ISO 8601).
    pub external_requisition_date: String,

    pub external_system_id: String,
}

/// Outer envelope of a submitted requisition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequisitionRequest {
    pub requisition: Requisition,
    pub billing_reference_number: String,
    pub service_assignment_id: String,
    pub message_tracking_id: String,
    pub destination: Party,
    pub submitted_by_staff_name: String,
    pub provider: Provider,
    pub sender: Party,
}

/// Serde adapter for the numeric `quantity` field.
///
/// Whole values are written as integers so that `2` is not re-encoded as `2.0`. Non-finite values
/// (`.nan`, `.inf` in YAML) are rejected in both directions; JSON cannot carry them.
mod quantity {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    // Largest magnitude at which every whole f64 is exactly representable as an integer.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if !value.is_finite() {
            return Err(ser::Error::custom(format!(
                "quantity must be a finite number, got {value}"
            )));
        }
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(de::Error::custom(format!(
                "quantity must be a finite number, got {value}"
            )));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> ItemRequest {
        ItemRequest {
            external_reference_number: "LN-1".into(),
            quantity: 2.0,
            additional_information: "Left side".into(),
            master_item_guid: "3f2b8c1e-7a4d-4e9b-8c2f-1d6a5e4b3c21".into(),
            external_system_id: "EXT-SYS".into(),
        }
    }

    #[test]
    fn approved_item_has_no_denial_details() {
        let extended = ExtendedItemRequest::approved(sample_item(), "WC-01", "Wheelchair", false);

        assert_eq!(extended.status, AdjudicationStatus::Approved);
        assert!(!extended.has_denial_details());
        assert_eq!(extended.item(), sample_item());

        let value = serde_json::to_value(&extended).expect("serialize");
        assert!(value.get("denialReason").is_none());
        assert!(value.get("denialReasonCode").is_none());
        assert_eq!(value["masterItemCode"], "WC-01");
        assert_eq!(value["isReplacement"], false);
    }

    #[test]
    fn denied_item_carries_denial_details() {
        let extended = ExtendedItemRequest::denied(
            sample_item(),
            "WC-01",
            "Wheelchair",
            true,
            "DUP",
            "Duplicate of an open requisition",
        );

        assert_eq!(extended.status, AdjudicationStatus::Denied);
        assert_eq!(extended.denial_reason_code.as_deref(), Some("DUP"));
        assert_eq!(
            extended.denial_reason.as_deref(),
            Some("Duplicate of an open requisition")
        );

        let value = serde_json::to_value(&extended).expect("serialize");
        assert_eq!(value["status"], "DENIED");
        assert_eq!(value["denialReasonCode"], "DUP");
    }

    #[test]
    fn extended_item_rejects_unknown_status() {
        let input = r#"{
            "external_reference_number": "LN-1",
            "quantity": 1,
            "additional_information": "",
            "master_item_guid": "3f2b8c1e-7a4d-4e9b-8c2f-1d6a5e4b3c21",
            "external_system_id": "EXT-SYS",
            "status": "PENDING",
            "isReplacement": false,
            "masterItemDesc": "Wheelchair",
            "masterItemCode": "WC-01"
        }"#;

        let err = serde_json::from_str::<ExtendedItemRequest>(input)
            .expect_err("should reject PENDING");
        assert!(err.to_string().contains("PENDING"));
    }

    #[test]
    fn item_accepts_integer_and_decimal_quantities() {
        let whole: ItemRequest = serde_json::from_str(
            r#"{"external_reference_number":"A","quantity":3,"additional_information":"",
                "master_item_guid":"g","external_system_id":"s"}"#,
        )
        .expect("integer quantity");
        assert_eq!(whole.quantity, 3.0);

        let fractional: ItemRequest = serde_json::from_str(
            r#"{"external_reference_number":"A","quantity":0.5,"additional_information":"",
                "master_item_guid":"g","external_system_id":"s"}"#,
        )
        .expect("decimal quantity");
        assert_eq!(fractional.quantity, 0.5);
    }

    #[test]
    fn whole_quantities_are_written_as_integers() {
        let mut item = sample_item();
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["quantity"], serde_json::json!(2));
        assert!(serde_json::to_string(&item).expect("json").contains("\"quantity\":2,"));

        item.quantity = 1.5;
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["quantity"], serde_json::json!(1.5));

        let yaml = serde_yaml::to_string(&sample_item()).expect("yaml");
        assert!(yaml.contains("quantity: 2\n"));
    }

    #[test]
    fn rejects_non_finite_quantities() {
        for literal in [".nan", ".inf", "-.inf"] {
            let input = format!(
                "external_reference_number: A\nquantity: {literal}\nadditional_information: ''\n\
                 master_item_guid: g\nexternal_system_id: s\n"
            );
            let err = serde_yaml::from_str::<ItemRequest>(&input).expect_err("should reject");
            assert!(err.to_string().contains("finite"), "unexpected error: {err}");
        }

        let mut item = sample_item();
        item.quantity = f64::INFINITY;
        assert!(serde_json::to_string(&item).is_err());
    }
}
