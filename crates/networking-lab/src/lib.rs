//! Networking Lab: persona quiz funnel, lead capture, admin analytics, and the
//! before/during/after networking companion.

pub mod admin;
pub mod companion;
pub mod config;
pub mod error;
pub mod leads;
pub mod quiz;
pub mod telemetry;

pub use error::AppError;
