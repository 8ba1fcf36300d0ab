//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Services do
//! not read environment variables themselves, so behaviour stays consistent across threads and
//! test harnesses.

use crate::constants::DEFAULT_FORMAT;
use crate::{CoreError, CoreResult};
use requisition::WireFormat;

/// How conformance findings are treated when loading a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConformanceMode {
    /// Skip conformance checks entirely.
    Off,
    /// Log each finding and still return the payload.
    #[default]
    Warn,
    /// Fail the load when any finding is reported.
    Enforce,
}

impl ConformanceMode {
    /// Parses a mode name (case-insensitive).
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "enforce" => Ok(Self::Enforce),
            _ => Err(CoreError::InvalidInput(format!(
                "Invalid conformance mode: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Enforce => "enforce",
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    default_format: WireFormat,
    conformance_mode: ConformanceMode,
}

impl CoreConfig {
    pub fn new(default_format: WireFormat, conformance_mode: ConformanceMode) -> Self {
        Self {
            default_format,
            conformance_mode,
        }
    }

    pub fn default_format(&self) -> WireFormat {
        self.default_format
    }

    pub fn conformance_mode(&self) -> ConformanceMode {
        self.conformance_mode
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the default wire format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_FORMAT`].
pub fn wire_format_from_env_value(value: Option<String>) -> CoreResult<WireFormat> {
    let parsed = non_blank(value)
        .map(|v| WireFormat::parse(&v))
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_FORMAT))
}

/// Parse the conformance mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ConformanceMode::Warn`].
pub fn conformance_mode_from_env_value(value: Option<String>) -> CoreResult<ConformanceMode> {
    let parsed = non_blank(value)
        .map(|v| ConformanceMode::parse(&v))
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}
