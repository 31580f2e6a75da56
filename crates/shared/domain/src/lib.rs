//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde` only).
//! Keep it lean: no I/O, networking, or heavy logic. Just data and simple helpers.

pub mod constants;
pub mod environment;
pub mod options;
