//! Configuration types for sensitivity sweeps.

use crate::error::{ConfigError, Result};
use crate::model::AccountId;
use serde::{Deserialize, Serialize};

/// Most runs a single sweep may request
pub const MAX_SWEEP_STEPS: usize = 200;

/// Scalar input a sweep varies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepParameter {
    AnnualSalary,
    MonthlyExpenses,
    MonthlySavingsRate,
    AnnualSalaryGrowth,
    AnnualExpenseGrowth,
    InflationRate,
    /// Annual return of one account type
    InvestmentReturn { account_type: String },
    /// Annual appreciation of one asset type
    AssetAppreciation { asset_type: String },
    /// Standing extra monthly payment on one debt
    ExtraDebtPayment { account_id: AccountId },
}

impl SweepParameter {
    /// Get a descriptive label for display
    pub fn label(&self) -> String {
        match self {
            SweepParameter::AnnualSalary => "Annual salary".to_string(),
            SweepParameter::MonthlyExpenses => "Monthly expenses".to_string(),
            SweepParameter::MonthlySavingsRate => "Savings rate".to_string(),
            SweepParameter::AnnualSalaryGrowth => "Salary growth".to_string(),
            SweepParameter::AnnualExpenseGrowth => "Expense growth".to_string(),
            SweepParameter::InflationRate => "Inflation".to_string(),
            SweepParameter::InvestmentReturn { account_type } => {
                format!("Return ({account_type})")
            }
            SweepParameter::AssetAppreciation { asset_type } => {
                format!("Appreciation ({asset_type})")
            }
            SweepParameter::ExtraDebtPayment { account_id } => {
                format!("Extra payment ({account_id})")
            }
        }
    }
}

/// One parameter swept over `[min_value, max_value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub parameter: SweepParameter,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of runs, endpoints included
    pub step_count: usize,
}

impl SweepConfig {
    pub fn new(
        parameter: SweepParameter,
        min_value: f64,
        max_value: f64,
        step_count: usize,
    ) -> Self {
        Self {
            parameter,
            min_value,
            max_value,
            step_count,
        }
    }

    /// Evenly spaced values from `min_value` to `max_value`
    pub fn sweep_values(&self) -> Vec<f64> {
        if self.step_count <= 1 {
            return vec![self.min_value];
        }
        let step_size = (self.max_value - self.min_value) / (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| self.min_value + step_size * i as f64)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_SWEEP_STEPS).contains(&self.step_count) {
            return Err(ConfigError::InvalidSweep {
                field: "step_count".to_string(),
                reason: format!(
                    "must be between 2 and {MAX_SWEEP_STEPS}, got {}",
                    self.step_count
                ),
            });
        }
        for (field, value) in [("min_value", self.min_value), ("max_value", self.max_value)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue {
                    field: field.to_string(),
                });
            }
        }
        if self.min_value > self.max_value {
            return Err(ConfigError::InvalidSweep {
                field: "min_value".to_string(),
                reason: format!(
                    "{} is greater than max_value {}",
                    self.min_value, self.max_value
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_values_include_endpoints() {
        let sweep = SweepConfig::new(SweepParameter::MonthlySavingsRate, 0.0, 1.0, 5);
        assert_eq!(sweep.sweep_values(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_validate_step_count() {
        let sweep = SweepConfig::new(SweepParameter::AnnualSalary, 0.0, 1.0, 1);
        let err = sweep.validate().unwrap_err();
        assert_eq!(err.code(), "invalid_sweep");
        assert_eq!(err.field(), "step_count");

        let sweep = SweepConfig::new(SweepParameter::AnnualSalary, 0.0, 1.0, MAX_SWEEP_STEPS + 1);
        assert!(sweep.validate().is_err());

        let sweep = SweepConfig::new(SweepParameter::AnnualSalary, 0.0, 1.0, MAX_SWEEP_STEPS);
        assert!(sweep.validate().is_ok());
    }

    #[test]
    fn test_validate_range() {
        let sweep = SweepConfig::new(SweepParameter::InflationRate, 0.05, 0.01, 3);
        assert_eq!(sweep.validate().unwrap_err().field(), "min_value");

        let sweep = SweepConfig::new(SweepParameter::InflationRate, f64::NAN, 0.01, 3);
        assert_eq!(sweep.validate().unwrap_err().code(), "non_finite_value");

        // A degenerate range is allowed
        let sweep = SweepConfig::new(SweepParameter::InflationRate, 0.02, 0.02, 3);
        assert!(sweep.validate().is_ok());
    }

    #[test]
    fn test_parameter_json_shape() {
        let param: SweepParameter =
            serde_json::from_str(r#"{"kind": "investment_return", "account_type": "tfsa"}"#)
                .unwrap();
        assert_eq!(
            param,
            SweepParameter::InvestmentReturn {
                account_type: "tfsa".to_string()
            }
        );
        let param: SweepParameter = serde_json::from_str(r#"{"kind": "annual_salary"}"#).unwrap();
        assert_eq!(param, SweepParameter::AnnualSalary);
    }
}
