//! Service layer for business logic with dependency injection.
//!
//! This module contains services that encapsulate business logic and accept
//! trait-based dependencies, enabling testing with mock implementations.

pub mod demo;
pub mod preview;

#[cfg(test)]
pub mod test_mocks;

pub use demo::{DemoService, DemoSettings, Flow, PendingCommit, RunPlan};
pub use preview::PreviewService;
