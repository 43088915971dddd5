//! Archedisk Core Types and Definitions
//!
//! This crate provides the foundational types for laying out a disc: a bounded
//! time interval drawn as concentric rings of time-stamped activities. It
//! includes:
//!
//! - **Model**: The disc document as persisted ([`model`] module)
//! - **Temporal**: Date parsing, date ⇄ angle mapping and calendar helpers ([`temporal`] module)
//! - **Geometry**: Polar/Cartesian conversion and path descriptors ([`geometry`] module)
//! - **Diagnostics**: Structured, non-fatal layout anomalies ([`diagnostic`] module)
//! - **Errors**: Fatal layout conditions ([`error::LayoutError`])
//! - **Colors**: CSS color handling ([`color::Color`])

pub mod color;
pub mod diagnostic;
pub mod error;
pub mod geometry;
pub mod model;
pub mod temporal;

pub use error::LayoutError;
