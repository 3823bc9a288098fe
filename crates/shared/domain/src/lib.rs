//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O, networking, or heavy logic—just data and simple helpers.
//!
//! * [`config`] — layered application configuration.
//! * [`model`] — package, module and directory metadata in both the legacy and the
//!   version-aware shape.
//! * [`tabs`] — the tab registry shared by the router and the dispatcher.
//! * [`paths`] — import path and request path helpers.

pub mod capabilities;
pub mod config;
pub mod constants;
pub mod model;
pub mod paths;
pub mod tabs;
