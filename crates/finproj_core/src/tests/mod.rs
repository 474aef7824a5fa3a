//! Scenario tests for the projection engine
//!
//! Tests are organized by topic:
//! - `basic` - Cash accumulation, allocation, growth and series shape
//! - `events` - Dated one-time and persistent overrides
//! - `debts` - Amortization inside a full projection
//! - `properties` - Property-based checks of the arithmetic building blocks

mod properties;

use crate::config::{ProjectionBuilder, ProjectionInput};
use crate::model::ProjectionResponse;
use crate::simulation::project;

/// No tax, no growth, no inflation, starting 2025-01-01
fn flat_builder() -> ProjectionBuilder {
    ProjectionBuilder::new()
        .start(2025, 1, 1)
        .no_tax()
        .no_growth()
        .inflation(0.0)
}

fn run(input: &ProjectionInput) -> ProjectionResponse {
    project(input).expect("projection should succeed")
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "Expected {expected:.4}, got {actual:.4}"
    );
}
