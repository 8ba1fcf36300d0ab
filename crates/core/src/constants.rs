//! Constants used throughout the requisition core crate.

/// Environment variable selecting the default wire format (`json` or `yaml`).
pub const FORMAT_ENV_VAR: &str = "REQUISITION_FORMAT";

/// Environment variable selecting the conformance mode (`off`, `warn` or `enforce`).
pub const CONFORMANCE_ENV_VAR: &str = "REQUISITION_CONFORMANCE";

/// Wire format used when neither the caller nor the file extension names one.
pub const DEFAULT_FORMAT: requisition::WireFormat = requisition::WireFormat::Json;
