//! Conformance checks for invariants the wire types do not enforce.
//!
//! Decoding only guarantees shape. This module checks the documented expectations on top of it:
//! non-empty item lists, positive quantities, GUID-shaped catalog links, ISO 8601 dates, non-blank
//! correlation identifiers, and the rule that denial details accompany only denied items.
//!
//! A denied item *without* a denial reason is accepted: both denial fields are optional on the
//! wire. Only denial details on an approved item are reported.

use crate::request::{ExtendedItemRequest, ItemRequest, RequisitionRequest};
use crate::response::{ItemResponse, RequisitionResponse};
use crate::status::AdjudicationStatus;
use crate::{RequisitionError, RequisitionResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use requisition_types::NonEmptyText;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// A single conformance problem, located by its wire path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Wire path of the offending field, e.g. `requisition.items[0].quantity`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of a conformance check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    findings: Vec<Finding>,
}

impl ConformanceReport {
    pub fn is_conformant(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Converts a report with findings into [`RequisitionError::Nonconformant`].
    pub fn into_result(self) -> RequisitionResult<()> {
        if self.is_conformant() {
            Ok(())
        } else {
            Err(RequisitionError::Nonconformant(self))
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.findings.push(Finding {
            path: path.into(),
            message: message.into(),
        });
    }

    fn require_text(&mut self, path: &str, value: &str) {
        if NonEmptyText::new(value).is_err() {
            self.push(path, "must not be blank");
        }
    }

    fn require_guid(&mut self, path: &str, value: &str) {
        if Uuid::parse_str(value.trim()).is_err() {
            self.push(path, format!("is not a GUID: {value:?}"));
        }
    }

    fn require_iso_date(&mut self, path: &str, value: &str) {
        if !is_iso8601(value) {
            self.push(path, format!("is not an ISO 8601 date: {value:?}"));
        }
    }

    fn require_positive_quantity(&mut self, path: &str, quantity: f64) {
        if !quantity.is_finite() || quantity <= 0.0 {
            self.push(path, format!("must be a positive number, got {quantity}"));
        }
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} finding(s)", self.findings.len())?;
        for finding in &self.findings {
            write!(f, "; {finding}")?;
        }
        Ok(())
    }
}

/// Conformance checks.
///
/// This is a zero-sized type used for namespacing checks. All methods are associated functions.
pub struct Conformance;

impl Conformance {
    /// Checks a requisition request envelope.
    pub fn check_request(request: &RequisitionRequest) -> ConformanceReport {
        let mut report = ConformanceReport::default();
        let requisition = &request.requisition;

        report.require_text("message_tracking_id", &request.message_tracking_id);
        report.require_text("service_assignment_id", &request.service_assignment_id);
        report.require_text("billing_reference_number", &request.billing_reference_number);
        report.require_text(
            "requisition.external_reference_number",
            &requisition.external_reference_number,
        );
        report.require_text(
            "requisition.external_system_id",
            &requisition.external_system_id,
        );
        report.require_iso_date(
            "requisition.external_requisition_date",
            &requisition.external_requisition_date,
        );
        report.require_iso_date(
            "requisition.reception.receive_at",
            &requisition.reception.receive_at,
        );

        if requisition.items.is_empty() {
            report.push("requisition.items", "must contain at least one item");
        }
        for (idx, item) in requisition.items.iter().enumerate() {
            check_item(&mut report, &format!("requisition.items[{idx}]"), item);
        }

        report
    }

    /// Checks a single adjudicated item.
    pub fn check_extended_item(item: &ExtendedItemRequest) -> ConformanceReport {
        let mut report = ConformanceReport::default();
        check_item(&mut report, "<item>", &item.item());

        if item.status == AdjudicationStatus::Approved && item.has_denial_details() {
            report.push(
                "<item>.status",
                "denialReason/denialReasonCode are only allowed when status is DENIED",
            );
        }

        report
    }

    /// Checks a requisition response envelope.
    pub fn check_response(response: &RequisitionResponse) -> ConformanceReport {
        let mut report = ConformanceReport::default();
        let body = response.body();
        let header = response.header();

        const BODY: &str = "EquipmentAndSuppliesRequisitionResponse";
        const HEADER: &str = "EquipmentAndSuppliesRequisitionResponse.EquipmentAndSuppliesRequisition.RequisitionHeader";

        report.require_text(
            &format!("{BODY}.MessageTrackingID"),
            &body.message_tracking_id,
        );
        report.require_text(
            &format!("{BODY}.ServiceAssignmentId"),
            &body.service_assignment_id,
        );
        report.require_guid(
            &format!("{HEADER}.RequisitionGuid"),
            &header.requisition_guid,
        );
        report.require_iso_date(&format!("{HEADER}.ApprovedDate"), &header.approved_date);

        for (idx, item) in response.line_items().iter().enumerate() {
            let path =
                format!("{BODY}.EquipmentAndSuppliesRequisition.LineItem[{idx}]");
            check_line_item(&mut report, &path, item);
        }

        report
    }
}

fn check_item(report: &mut ConformanceReport, path: &str, item: &ItemRequest) {
    report.require_text(
        &format!("{path}.external_reference_number"),
        &item.external_reference_number,
    );
    report.require_positive_quantity(&format!("{path}.quantity"), item.quantity);
    report.require_guid(&format!("{path}.master_item_guid"), &item.master_item_guid);
}

fn check_line_item(report: &mut ConformanceReport, path: &str, item: &ItemResponse) {
    report.require_guid(&format!("{path}.LineItemGuid"), &item.line_item_guid);
    report.require_guid(&format!("{path}.MasterItemGuid"), &item.master_item_guid);

    match item.status() {
        Ok(AdjudicationStatus::Approved) if item.has_denial_details() => report.push(
            format!("{path}.LineItemStatusCode"),
            "DenialReason/DenialReasonCode are only allowed when the status is DENIED",
        ),
        Ok(_) => {}
        Err(_) => report.push(
            format!("{path}.LineItemStatusCode"),
            format!(
                "must be APPROVED or DENIED, got {:?}",
                item.line_item_status_code
            ),
        ),
    }
}

/// Accepts RFC 3339 date-times, naive date-times and calendar dates.
fn is_iso8601(value: &str) -> bool {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{Owner, Party, Provider};
    use crate::request::{Address, Reception, Requisition};
    use crate::response::{
        EquipmentAndSuppliesRequisition, EquipmentAndSuppliesRequisitionResponse,
        RequisitionHeader,
    };

    const GUID: &str = "3f2b8c1e-7a4d-4e9b-8c2f-1d6a5e4b3c21";

    fn item() -> ItemRequest {
        ItemRequest {
            external_reference_number: "LN-1".into(),
            quantity: 1.0,
            additional_information: String::new(),
            master_item_guid: GUID.into(),
            external_system_id: "EXT-SYS".into(),
        }
    }

    fn party(code: &str) -> Party {
        Party {
            kind: "SITE".into(),
            name: "Site".into(),
            code: code.into(),
            owner: Owner {
                kind: "ORGANISATION".into(),
                name: "Regional Health".into(),
                code: "RH".into(),
            },
        }
    }

    fn request() -> RequisitionRequest {
        RequisitionRequest {
            requisition: Requisition {
                external_reference_number: "REQ-1".into(),
                items: vec![item()],
                reception: Reception {
                    kind: "HOME".into(),
                    receive_at: "2024-01-01T00:00:00Z".into(),
                    instructions: String::new(),
                    address: Address {
                        postal_code: "A1A 1A1".into(),
                        street_name: "Main St".into(),
                        city: "Springfield".into(),
                        street_number: "12".into(),
                        province: "ON".into(),
                        country: "CA".into(),
                    },
                },
                external_requisition_date: "2023-12-30".into(),
                external_system_id: "EXT-SYS".into(),
            },
            billing_reference_number: "BILL-9".into(),
            service_assignment_id: "SA-42".into(),
            message_tracking_id: "MT-0001".into(),
            destination: party("V1"),
            submitted_by_staff_name: "Alex Clerk".into(),
            provider: Provider {
                name: "Acme Supplies".into(),
                number: "P-77".into(),
            },
            sender: party("C1"),
        }
    }

    fn line_item(status: &str) -> ItemResponse {
        ItemResponse {
            external_reference_number: "LN-1".into(),
            master_item_guid: GUID.into(),
            master_item_code: "WC-01".into(),
            master_item_desc: "Wheelchair".into(),
            line_item_guid: "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d".into(),
            line_item_number: "1".into(),
            item_type_code: "EQ".into(),
            item_type: "Equipment".into(),
            item_unit: "EA".into(),
            quantity: "one box".into(),
            additional_information: String::new(),
            line_item_status_code: status.into(),
            line_item_status: status.into(),
            denial_reason_code: None,
            denial_reason: None,
        }
    }

    fn response(items: Vec<ItemResponse>) -> RequisitionResponse {
        RequisitionResponse::new(EquipmentAndSuppliesRequisitionResponse {
            sender: party("V1"),
            message_tracking_id: "MT-0001".into(),
            service_assignment_id: "SA-42".into(),
            equipment_and_supplies_requisition: EquipmentAndSuppliesRequisition {
                requisition_header: RequisitionHeader {
                    external_system_id: "EXT-SYS".into(),
                    external_reference_number: "REQ-1".into(),
                    requisition_guid: "1b2c3d4e-5f6a-4b7c-8d9e-0f1a2b3c4d5e".into(),
                    requisition_number: "R-100".into(),
                    requisition_status_code: AdjudicationStatus::Approved,
                    requisition_status: "Approved".into(),
                    approved_by_staff_name: "Sam Reviewer".into(),
                    approved_date: "2024-01-02T09:30:00".into(),
                },
                line_items: items,
            },
            destination: party("C1"),
        })
    }

    fn paths(report: &ConformanceReport) -> Vec<&str> {
        report.findings().iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn accepts_valid_request() {
        let report = Conformance::check_request(&request());
        assert!(report.is_conformant(), "unexpected findings: {report}");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn reports_empty_item_list() {
        let mut req = request();
        req.requisition.items.clear();

        let report = Conformance::check_request(&req);
        assert_eq!(paths(&report), vec!["requisition.items"]);
    }

    #[test]
    fn reports_non_positive_and_non_finite_quantities() {
        let mut req = request();
        req.requisition.items[0].quantity = 0.0;
        let mut second = item();
        second.quantity = f64::NAN;
        req.requisition.items.push(second);

        let report = Conformance::check_request(&req);
        assert_eq!(
            paths(&report),
            vec![
                "requisition.items[0].quantity",
                "requisition.items[1].quantity"
            ]
        );
    }

    #[test]
    fn reports_blank_identifiers_bad_guid_and_bad_dates() {
        let mut req = request();
        req.message_tracking_id = "   ".into();
        req.requisition.reception.receive_at = "next tuesday".into();
        req.requisition.items[0].master_item_guid = "WC-01".into();

        let report = Conformance::check_request(&req);
        assert_eq!(
            paths(&report),
            vec![
                "message_tracking_id",
                "requisition.reception.receive_at",
                "requisition.items[0].master_item_guid"
            ]
        );
    }

    #[test]
    fn denied_item_may_carry_or_omit_denial_details() {
        let with_reason =
            ExtendedItemRequest::denied(item(), "WC-01", "Wheelchair", false, "DUP", "Duplicate");
        assert!(Conformance::check_extended_item(&with_reason).is_conformant());

        let mut without_reason = with_reason.clone();
        without_reason.denial_reason = None;
        without_reason.denial_reason_code = None;
        assert!(Conformance::check_extended_item(&without_reason).is_conformant());
    }

    #[test]
    fn approved_item_without_denial_details_is_conformant() {
        let approved = ExtendedItemRequest::approved(item(), "WC-01", "Wheelchair", true);
        assert!(Conformance::check_extended_item(&approved).is_conformant());
    }

    #[test]
    fn approved_item_with_denial_details_is_reported() {
        let mut approved = ExtendedItemRequest::approved(item(), "WC-01", "Wheelchair", false);
        approved.denial_reason_code = Some("DUP".into());

        let report = Conformance::check_extended_item(&approved);
        assert_eq!(paths(&report), vec!["<item>.status"]);

        let err = report.into_result().expect_err("should be nonconformant");
        match err {
            RequisitionError::Nonconformant(report) => {
                assert_eq!(report.findings().len(), 1);
            }
            other => panic!("expected Nonconformant error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_response_with_textual_quantity() {
        let report = Conformance::check_response(&response(vec![line_item("APPROVED")]));
        assert!(report.is_conformant(), "unexpected findings: {report}");
    }

    #[test]
    fn reports_unknown_line_item_status_and_misplaced_denial() {
        let mut approved_with_reason = line_item("APPROVED");
        approved_with_reason.denial_reason = Some("Not covered".into());
        let mut denied = line_item("DENIED");
        denied.denial_reason = Some("Not covered".into());

        let report = Conformance::check_response(&response(vec![
            line_item("BACKORDERED"),
            approved_with_reason,
            denied,
        ]));

        let prefix = "EquipmentAndSuppliesRequisitionResponse.EquipmentAndSuppliesRequisition";
        let expected = vec![
            format!("{prefix}.LineItem[0].LineItemStatusCode"),
            format!("{prefix}.LineItem[1].LineItemStatusCode"),
        ];
        assert_eq!(paths(&report), expected);
    }

    #[test]
    fn report_display_lists_findings() {
        let mut req = request();
        req.requisition.items.clear();

        let text = Conformance::check_request(&req).to_string();
        assert_eq!(
            text,
            "1 finding(s); requisition.items: must contain at least one item"
        );
    }

    #[test]
    fn iso8601_variants() {
        assert!(is_iso8601("2024-01-01T00:00:00Z"));
        assert!(is_iso8601("2024-01-01T00:00:00.125+02:00"));
        assert!(is_iso8601("2024-01-01T08:15:00"));
        assert!(is_iso8601("2024-01-01"));
        assert!(!is_iso8601("01/02/2024"));
        assert!(!is_iso8601(""));
    }
}
