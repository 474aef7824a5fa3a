//! Personal finance projection library
//!
//! This crate provides a deterministic month-by-month projection engine for
//! household finances. It supports:
//! - Progressive federal and provincial income tax brackets
//! - Fixed-payment debt amortization at several payment frequencies
//! - Monthly-compounded investment returns and asset appreciation
//! - Dated events that change salary, expenses or savings rate, permanently
//!   or for a single month
//! - Savings allocation across investment account types
//! - Sensitivity sweeps over any scalar parameter
//!
//! # Builder DSL
//!
//! ```ignore
//! use finproj_core::{ProjectionBuilder, project};
//! use finproj_core::model::DebtAccount;
//!
//! let input = ProjectionBuilder::new()
//!     .start(2025, 1, 1)
//!     .years(10)
//!     .salary(85_000.0)
//!     .monthly_expenses(3_200.0)
//!     .cash("chequing", 4_000.0)
//!     .investment("tfsa", "tfsa", 15_000.0)
//!     .allocate("tfsa", 1.0)
//!     .debt(DebtAccount::new("car", 22_000.0, 0.069, 60))
//!     .build();
//!
//! let response = project(&input)?;
//! println!("net worth in 10 years: {:.0}", response.final_net_worth());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod amortization;
pub mod analysis;
pub mod apply;
pub mod date_math;
pub mod error;
pub mod growth;
pub mod simulation;
pub mod simulation_state;
pub mod taxes;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ProjectionBuilder, ProjectionConfig, ProjectionInput};
pub use error::ConfigError;
pub use model::ProjectionResponse;
pub use simulation::{project, project_from};
