//! Sweep evaluation: perturb, project, summarize.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::config::{SweepConfig, SweepParameter};
use crate::config::ProjectionInput;
use crate::error::Result;
use crate::simulation::project_from;

/// Headline outcome of one run in a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub final_net_worth: f64,
    pub final_real_net_worth: f64,
    pub final_liabilities: f64,
    pub debt_free_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub parameter: SweepParameter,
    /// One point per sweep value, in ascending value order
    pub points: Vec<SweepPoint>,
}

/// Copy of `input` with `parameter` set to `value`
pub fn apply_parameter(
    input: &ProjectionInput,
    parameter: &SweepParameter,
    value: f64,
) -> ProjectionInput {
    let mut input = input.clone();
    let config = &mut input.config;
    match parameter {
        SweepParameter::AnnualSalary => config.annual_salary = value,
        SweepParameter::MonthlyExpenses => config.monthly_expenses = value,
        SweepParameter::MonthlySavingsRate => config.monthly_savings_rate = value,
        SweepParameter::AnnualSalaryGrowth => config.annual_salary_growth = value,
        SweepParameter::AnnualExpenseGrowth => config.annual_expense_growth = value,
        SweepParameter::InflationRate => config.inflation_rate = value,
        SweepParameter::InvestmentReturn { account_type } => {
            config
                .investment_returns
                .insert(account_type.clone(), value);
        }
        SweepParameter::AssetAppreciation { asset_type } => {
            config.asset_appreciation.insert(asset_type.clone(), value);
        }
        SweepParameter::ExtraDebtPayment { account_id } => {
            config.extra_debt_payments.insert(account_id.clone(), value);
        }
    }
    input
}

/// Run the projection once per sweep value.
///
/// The base input and the sweep are validated first; any perturbed run that
/// fails validation fails the whole sweep. All runs share one start date.
pub fn sensitivity(input: &ProjectionInput, sweep: &SweepConfig) -> Result<SweepResult> {
    sweep.validate()?;
    let start_date = input.config.resolved_start_date();
    input.validate_from(start_date)?;

    let values = sweep.sweep_values();
    tracing::debug!(
        parameter = %sweep.parameter.label(),
        runs = values.len(),
        "starting sensitivity sweep"
    );

    let evaluate = |&value: &f64| -> Result<SweepPoint> {
        let perturbed = apply_parameter(input, &sweep.parameter, value);
        let response = project_from(&perturbed, start_date)?;
        Ok(SweepPoint {
            value,
            final_net_worth: response.summary.final_net_worth,
            final_real_net_worth: response.summary.final_real_net_worth,
            final_liabilities: response.final_liabilities(),
            debt_free_date: response.summary.debt_free_date,
        })
    };

    #[cfg(feature = "parallel")]
    let points: Result<Vec<SweepPoint>> = values.par_iter().map(evaluate).collect();

    #[cfg(not(feature = "parallel"))]
    let points: Result<Vec<SweepPoint>> = values.iter().map(evaluate).collect();

    Ok(SweepResult {
        parameter: sweep.parameter.clone(),
        points: points?,
    })
}
