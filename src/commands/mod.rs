//! Top-level command orchestration.
pub mod bootstrap;
pub mod list;
