//! File-level requisition operations.
//!
//! This module reads and writes requisition payloads on disk and applies the configured
//! conformance mode. It contains **only** data operations; it does not transport payloads or
//! adjudicate items.

use crate::config::{ConformanceMode, CoreConfig};
use crate::error::{CoreError, CoreResult};
use requisition::{
    Conformance, ConformanceReport, RequisitionCodec, RequisitionRequest, RequisitionResponse,
    WireFormat,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A decoded payload together with its conformance report.
///
/// The report is empty when the conformance mode is [`ConformanceMode::Off`].
#[derive(Clone, Debug)]
pub struct Checked<T> {
    pub payload: T,
    pub report: ConformanceReport,
}

/// Service for loading, saving and converting requisition files.
#[derive(Clone, Debug)]
pub struct RequisitionService {
    cfg: Arc<CoreConfig>,
}

impl RequisitionService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Picks the wire format for `path`: `explicit` first, then the file extension, then the
    /// configured default.
    pub fn resolve_format(&self, path: &Path, explicit: Option<WireFormat>) -> WireFormat {
        explicit
            .or_else(|| WireFormat::from_path(path))
            .unwrap_or_else(|| self.cfg.default_format())
    }

    /// Loads and checks a requisition request file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FileRead`] if the file cannot be read, and [`CoreError::Requisition`]
    /// if it does not decode or, in [`ConformanceMode::Enforce`], is not conformant.
    pub fn load_request(
        &self,
        path: &Path,
        format: Option<WireFormat>,
    ) -> CoreResult<Checked<RequisitionRequest>> {
        let format = self.resolve_format(path, format);
        let text = read_text(path)?;
        let payload = RequisitionCodec::parse_request(&text, format)?;

        tracing::debug!(
            path = %path.display(),
            message_tracking_id = %payload.message_tracking_id,
            items = payload.requisition.items.len(),
            "loaded requisition request"
        );

        let report = self.apply_mode(path, || Conformance::check_request(&payload))?;
        Ok(Checked { payload, report })
    }

    /// Loads and checks a requisition response file.
    ///
    /// # Errors
    ///
    /// See [`RequisitionService::load_request`].
    pub fn load_response(
        &self,
        path: &Path,
        format: Option<WireFormat>,
    ) -> CoreResult<Checked<RequisitionResponse>> {
        let format = self.resolve_format(path, format);
        let text = read_text(path)?;
        let payload = RequisitionCodec::parse_response(&text, format)?;

        tracing::debug!(
            path = %path.display(),
            message_tracking_id = %payload.body().message_tracking_id,
            line_items = payload.line_items().len(),
            "loaded requisition response"
        );

        let report = self.apply_mode(path, || Conformance::check_response(&payload))?;
        Ok(Checked { payload, report })
    }

    /// Writes a requisition request to `path`.
    pub fn save_request(
        &self,
        path: &Path,
        request: &RequisitionRequest,
        format: Option<WireFormat>,
    ) -> CoreResult<()> {
        let format = self.resolve_format(path, format);
        let text = RequisitionCodec::render_request(request, format)?;
        write_text(path, &text)
    }

    /// Writes a requisition response to `path`.
    pub fn save_response(
        &self,
        path: &Path,
        response: &RequisitionResponse,
        format: Option<WireFormat>,
    ) -> CoreResult<()> {
        let format = self.resolve_format(path, format);
        let text = RequisitionCodec::render_response(response, format)?;
        write_text(path, &text)
    }

    /// Loads a request file and renders it in `to`.
    pub fn convert_request(
        &self,
        path: &Path,
        from: Option<WireFormat>,
        to: WireFormat,
    ) -> CoreResult<String> {
        let checked = self.load_request(path, from)?;
        Ok(RequisitionCodec::render_request(&checked.payload, to)?)
    }

    /// Loads a response file and renders it in `to`.
    pub fn convert_response(
        &self,
        path: &Path,
        from: Option<WireFormat>,
        to: WireFormat,
    ) -> CoreResult<String> {
        let checked = self.load_response(path, from)?;
        Ok(RequisitionCodec::render_response(&checked.payload, to)?)
    }

    fn apply_mode(
        &self,
        path: &Path,
        check: impl FnOnce() -> ConformanceReport,
    ) -> CoreResult<ConformanceReport> {
        match self.cfg.conformance_mode() {
            ConformanceMode::Off => Ok(ConformanceReport::default()),
            ConformanceMode::Warn => {
                let report = check();
                for finding in report.findings() {
                    tracing::warn!(
                        path = %path.display(),
                        field = %finding.path,
                        "{}",
                        finding.message
                    );
                }
                Ok(report)
            }
            ConformanceMode::Enforce => {
                let report = check();
                report.clone().into_result()?;
                Ok(report)
            }
        }
    }
}

fn read_text(path: &Path) -> CoreResult<String> {
    fs::read_to_string(path).map_err(CoreError::FileRead)
}

fn write_text(path: &Path, text: &str) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(CoreError::FileWrite)?;
    }
    fs::write(path, text).map_err(CoreError::FileWrite)
}
