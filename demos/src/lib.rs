//! Shared helpers for the glodabin demo binaries.
pub mod common;
