//! Governance Document Model
//!
//! Serde types for the persisted governance configuration: maintainer
//! roster, role reference data, voting rules, special per-PR-type policies,
//! and the append-only voting/override history.

pub mod types;

pub use types::*;
