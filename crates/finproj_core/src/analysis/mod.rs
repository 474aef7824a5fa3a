//! One-dimensional sensitivity sweeps.
//!
//! A sweep reruns the projection across evenly spaced values of one scalar
//! parameter and keeps a few headline numbers per run:
//!
//! ```ignore
//! use finproj_core::analysis::{SweepConfig, SweepParameter, sensitivity};
//!
//! let sweep = SweepConfig::new(SweepParameter::MonthlySavingsRate, 0.1, 0.9, 9);
//! let result = sensitivity(&input, &sweep)?;
//! for point in &result.points {
//!     println!("{:.2} -> {:.0}", point.value, point.final_net_worth);
//! }
//! ```
//!
//! Runs share nothing, so with the `parallel` feature they are spread across
//! the rayon pool.

mod config;
mod evaluator;

pub use config::*;
pub use evaluator::*;
