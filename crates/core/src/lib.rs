//! # Requisition Core
//!
//! File-level operations for equipment and supplies requisitions:
//! - startup configuration (default wire format, conformance mode)
//! - loading, saving and converting request/response payloads
//! - applying conformance checks according to the configured mode
//!
//! **No transport concerns**: payloads are read from and written to the local filesystem only.
//! Wire models live in the `requisition` crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod service;

pub use config::{
    conformance_mode_from_env_value, wire_format_from_env_value, ConformanceMode, CoreConfig,
};
pub use error::{CoreError, CoreResult};
pub use service::{Checked, RequisitionService};
