//! Fail-fast validation of a projection input
//!
//! Runs once, before the monthly loop, so the simulation itself never has to
//! deal with malformed input.

use jiff::ToSpan;
use jiff::civil::Date;
use rustc_hash::FxHashSet;

use super::{ProjectionConfig, ProjectionInput};
use crate::error::{ConfigError, Result};
use crate::model::{AccountId, EventKind};
use crate::simulation_state::SYNTHETIC_ID_PREFIX;
use crate::taxes::TaxSchedule;

pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 30;

/// Slack allowed on the allocation sum for floating-point noise
const ALLOCATION_TOLERANCE: f64 = 1e-9;
/// Lowest annual growth, return or inflation rate accepted
const MIN_RATE: f64 = -0.99;
const MAX_GROWTH_RATE: f64 = 1.0;
const MAX_RETURN_RATE: f64 = 10.0;

impl ProjectionInput {
    /// Validate with the start date the run would use
    pub fn validate(&self) -> Result<()> {
        self.validate_from(self.config.resolved_start_date())
    }

    pub fn validate_from(&self, start: Date) -> Result<()> {
        let config = &self.config;

        check_horizon(config.time_horizon_years)?;
        let end = end_date(start, config.time_horizon_years)?;
        TaxSchedule::new(&config.federal_tax_brackets, "federal_tax_brackets")?;
        TaxSchedule::new(&config.provincial_tax_brackets, "provincial_tax_brackets")?;
        check_scalars(config)?;
        check_rate_maps(config)?;
        check_allocation(config)?;
        self.check_accounts()?;
        self.check_debts()?;
        self.check_events(start, end)?;

        Ok(())
    }

    fn check_accounts(&self) -> Result<()> {
        let mut seen: FxHashSet<&AccountId> = FxHashSet::default();
        let ids = self
            .accounts
            .iter()
            .map(|a| &a.id)
            .chain(self.debts.iter().map(|d| &d.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateAccount { id: id.clone() });
            }
        }

        for account in &self.accounts {
            if account.id.as_str().starts_with(SYNTHETIC_ID_PREFIX) {
                return Err(ConfigError::ReservedAccountId {
                    id: account.id.clone(),
                    prefix: SYNTHETIC_ID_PREFIX,
                });
            }
            check_finite(account.balance, &format!("accounts[{}].balance", account.id))?;
        }
        Ok(())
    }

    fn check_debts(&self) -> Result<()> {
        for debt in &self.debts {
            let invalid = |reason: &str| ConfigError::InvalidDebt {
                id: debt.id.clone(),
                reason: reason.to_string(),
            };

            if !debt.balance.is_finite() || debt.balance < 0.0 {
                return Err(invalid("balance must be a non-negative amount owed"));
            }
            check_rate(
                debt.annual_rate,
                &format!("debts[{}].annual_rate", debt.id),
                0.0,
                1.0,
            )?;
            match debt.payment {
                Some(payment) if !payment.is_finite() || payment < 0.0 => {
                    return Err(invalid("payment must be a non-negative amount"));
                }
                None if debt.balance > 0.0 && debt.remaining_term_months == 0 => {
                    return Err(invalid(
                        "remaining_term_months must be positive when no payment is given",
                    ));
                }
                _ => {}
            }
        }

        for (account_id, amount) in &self.config.extra_debt_payments {
            if !self.has_debt(account_id) {
                return Err(ConfigError::UnknownDebt {
                    field: "extra_debt_payments".to_string(),
                    account_id: account_id.clone(),
                });
            }
            check_amount(*amount, &format!("extra_debt_payments[{account_id}]"))?;
        }
        Ok(())
    }

    fn check_events(&self, start: Date, end: Date) -> Result<()> {
        for event in &self.config.events {
            if event.date < start || event.date > end {
                return Err(ConfigError::EventOutsideHorizon {
                    id: event.id.clone(),
                    date: event.date,
                    start,
                    end,
                });
            }

            let field = |name: &str| format!("events[{}].{name}", event.id);
            match &event.kind {
                EventKind::OneTimeIncome { amount } | EventKind::OneTimeExpense { amount } => {
                    check_amount(*amount, &field("amount"))?;
                }
                EventKind::ExtraDebtPayment { account_id, amount } => {
                    if !self.has_debt(account_id) {
                        return Err(ConfigError::UnknownDebt {
                            field: field("account_id"),
                            account_id: account_id.clone(),
                        });
                    }
                    check_amount(*amount, &field("amount"))?;
                }
                EventKind::SalaryChange { annual_salary, .. } => {
                    check_amount(*annual_salary, &field("annual_salary"))?;
                }
                EventKind::ExpenseLevelChange {
                    monthly_expenses, ..
                } => {
                    check_amount(*monthly_expenses, &field("monthly_expenses"))?;
                }
                EventKind::SavingsRateChange { savings_rate, .. } => {
                    check_rate(*savings_rate, &field("savings_rate"), 0.0, 1.0)?;
                }
            }
        }
        Ok(())
    }
}

fn check_horizon(years: u32) -> Result<()> {
    if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&years) {
        return Err(ConfigError::HorizonOutOfRange {
            years,
            min: MIN_HORIZON_YEARS,
            max: MAX_HORIZON_YEARS,
        });
    }
    Ok(())
}

/// Date of the last point; the whole horizon must fit in the calendar
fn end_date(start: Date, years: u32) -> Result<Date> {
    start
        .checked_add((i64::from(years) * 12).months())
        .map_err(|_| ConfigError::StartDateOutOfRange { start, years })
}

fn check_scalars(config: &ProjectionConfig) -> Result<()> {
    check_amount(config.annual_salary, "annual_salary")?;
    check_amount(config.monthly_expenses, "monthly_expenses")?;
    check_rate(config.inflation_rate, "inflation_rate", MIN_RATE, MAX_GROWTH_RATE)?;
    check_rate(
        config.annual_salary_growth,
        "annual_salary_growth",
        MIN_RATE,
        MAX_GROWTH_RATE,
    )?;
    check_rate(
        config.annual_expense_growth,
        "annual_expense_growth",
        MIN_RATE,
        MAX_GROWTH_RATE,
    )?;
    check_rate(config.monthly_savings_rate, "monthly_savings_rate", 0.0, 1.0)
}

fn check_rate_maps(config: &ProjectionConfig) -> Result<()> {
    for (key, rate) in &config.investment_returns {
        check_rate(
            *rate,
            &format!("investment_returns[{key}]"),
            MIN_RATE,
            MAX_RETURN_RATE,
        )?;
    }
    for (key, rate) in &config.asset_appreciation {
        check_rate(
            *rate,
            &format!("asset_appreciation[{key}]"),
            MIN_RATE,
            MAX_RETURN_RATE,
        )?;
    }
    Ok(())
}

fn check_allocation(config: &ProjectionConfig) -> Result<()> {
    for (key, weight) in &config.savings_allocation {
        check_rate(*weight, &format!("savings_allocation[{key}]"), 0.0, 1.0)?;
    }
    let total = config.allocated_share();
    if total > 1.0 + ALLOCATION_TOLERANCE {
        return Err(ConfigError::AllocationExceedsOne { total });
    }
    Ok(())
}

fn check_finite(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteValue {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn check_amount(value: f64, field: &str) -> Result<()> {
    check_finite(value, field)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_rate(value: f64, field: &str, min: f64, max: f64) -> Result<()> {
    check_finite(value, field)?;
    if value < min || value > max {
        return Err(ConfigError::InvalidRate {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
