//! Encoding and decoding of requisition payloads.
//!
//! Decoding is strict: unknown keys, missing fields, wrong types and status values outside
//! `APPROVED`/`DENIED` are all rejected. Failures carry a best-effort path to the offending
//! field (for example `requisition.items[0].quantity`) via `serde_path_to_error`.

use crate::request::{ExtendedItemRequest, RequisitionRequest};
use crate::response::RequisitionResponse;
use crate::{RequisitionError, RequisitionResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Text formats a payload can be carried in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireFormat {
    #[default]
    Json,
    Yaml,
}

impl WireFormat {
    /// Parses a format name (`json`, `yaml` or `yml`, case-insensitive).
    pub fn parse(s: &str) -> Result<Self, RequisitionError> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(RequisitionError::InvalidInput(format!(
                "Invalid wire format: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::parse(ext).ok()
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requisition codec operations.
///
/// This is a zero-sized type used for namespacing encode/decode operations.
/// All methods are associated functions.
pub struct RequisitionCodec;

impl RequisitionCodec {
    /// Parse a requisition request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`RequisitionError::Translation`] if the text does not match the request schema,
    /// and [`RequisitionError::InvalidJson`] if a JSON document is followed by trailing content.
    pub fn parse_request(text: &str, format: WireFormat) -> RequisitionResult<RequisitionRequest> {
        decode(text, format, "Requisition request")
    }

    /// Render a requisition request envelope.
    pub fn render_request(
        request: &RequisitionRequest,
        format: WireFormat,
    ) -> RequisitionResult<String> {
        encode(request, format, "requisition request")
    }

    /// Parse a requisition response envelope.
    ///
    /// # Errors
    ///
    /// See [`RequisitionCodec::parse_request`].
    pub fn parse_response(
        text: &str,
        format: WireFormat,
    ) -> RequisitionResult<RequisitionResponse> {
        decode(text, format, "Requisition response")
    }

    /// Render a requisition response envelope.
    pub fn render_response(
        response: &RequisitionResponse,
        format: WireFormat,
    ) -> RequisitionResult<String> {
        encode(response, format, "requisition response")
    }

    /// Parse a single adjudicated item.
    pub fn parse_extended_item(
        text: &str,
        format: WireFormat,
    ) -> RequisitionResult<ExtendedItemRequest> {
        decode(text, format, "Extended item request")
    }

    /// Render a single adjudicated item.
    pub fn render_extended_item(
        item: &ExtendedItemRequest,
        format: WireFormat,
    ) -> RequisitionResult<String> {
        encode(item, format, "extended item request")
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn decode<T: DeserializeOwned>(
    text: &str,
    format: WireFormat,
    label: &str,
) -> RequisitionResult<T> {
    tracing::debug!(format = %format, "decoding {label}");

    match format {
        WireFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(text);
            let parsed = serde_path_to_error::deserialize::<_, T>(&mut deserializer)
                .map_err(|err| schema_mismatch(label, err))?;
            deserializer.end()?;
            Ok(parsed)
        }
        WireFormat::Yaml => {
            let deserializer = serde_yaml::Deserializer::from_str(text);
            serde_path_to_error::deserialize::<_, T>(deserializer)
                .map_err(|err| schema_mismatch(label, err))
        }
    }
}

fn encode<T: Serialize>(value: &T, format: WireFormat, label: &str) -> RequisitionResult<String> {
    tracing::debug!(format = %format, "encoding {label}");

    let rendered = match format {
        WireFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        WireFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    };
    rendered.map_err(|e| RequisitionError::Translation(format!("Failed to serialize {label}: {e}")))
}

fn schema_mismatch<E: fmt::Display>(
    label: &str,
    err: serde_path_to_error::Error<E>,
) -> RequisitionError {
    let path = err.path().to_string();
    let source = err.into_inner();
    let path = if path.is_empty() || path == "." {
        "<root>"
    } else {
        path.as_str()
    };
    RequisitionError::Translation(format!("{label} schema mismatch at {path}: {source}"))
}
