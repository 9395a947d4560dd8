//! warnalyze-core: Question bank, scoring engine, and diagnosis classifier.
//!
//! This crate defines the data model, the Ishihara plate bank, the pure
//! scoring and diagnosis logic, and the repository seam that the rest of
//! warnalyze builds on.

pub mod bank;
pub mod diagnosis;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod scoring;
pub mod statistics;
pub mod traits;
