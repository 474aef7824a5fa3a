//! Projection configuration
//!
//! `ProjectionConfig` is the one canonical description of a projection
//! scenario: income, taxes, spending, saving and the dated events that change
//! them. `ProjectionInput` pairs it with the household's current account and
//! debt balances, which is everything the engine needs for a run.
//!
//! # Builder DSL
//!
//! ```ignore
//! use finproj_core::config::ProjectionBuilder;
//!
//! let input = ProjectionBuilder::new()
//!     .start(2025, 1, 1)
//!     .years(10)
//!     .salary(95_000.0)
//!     .monthly_expenses(3_800.0)
//!     .savings_rate(0.6)
//!     .investment("tfsa", "tfsa", 25_000.0)
//!     .investment_return("tfsa", 0.06)
//!     .allocate("tfsa", 1.0)
//!     .build();
//! ```

use std::collections::BTreeMap;

use crate::model::{AccountBalance, AccountId, DebtAccount, Event, TaxBracket};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub mod builder;
mod validate;

pub use builder::ProjectionBuilder;
pub use validate::{MAX_HORIZON_YEARS, MIN_HORIZON_YEARS};

/// Complete projection scenario
///
/// # Conceptual Organization
///
/// **Economy** (assumptions you might compare):
/// - `inflation_rate`, `investment_returns`, `asset_appreciation`
/// - `federal_tax_brackets`, `provincial_tax_brackets`
///
/// **Household** (starting point):
/// - `annual_salary`, `monthly_expenses` and their yearly growth
///
/// **Plan** (tunable choices):
/// - `monthly_savings_rate`, `savings_allocation`, `extra_debt_payments`
/// - `events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// First point of the projection; today when absent
    pub start_date: Option<Date>,
    pub time_horizon_years: u32,

    // === Economy ===
    pub inflation_rate: f64,
    /// Annual return per account type ("tfsa", "rrsp", "brokerage", ...)
    pub investment_returns: BTreeMap<String, f64>,
    /// Annual appreciation (negative: depreciation) per asset type
    pub asset_appreciation: BTreeMap<String, f64>,
    pub federal_tax_brackets: Vec<TaxBracket>,
    pub provincial_tax_brackets: Vec<TaxBracket>,

    // === Household ===
    pub annual_salary: f64,
    pub annual_salary_growth: f64,
    pub monthly_expenses: f64,
    pub annual_expense_growth: f64,

    // === Plan ===
    /// Share of each month's surplus that gets invested
    pub monthly_savings_rate: f64,
    /// Share of invested savings per account type; the rest stays in cash
    pub savings_allocation: BTreeMap<String, f64>,
    /// Extra principal paid every month, per debt
    pub extra_debt_payments: BTreeMap<AccountId, f64>,
    pub events: Vec<Event>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            time_horizon_years: 10,
            inflation_rate: 0.02,
            investment_returns: BTreeMap::from([
                ("tfsa".to_string(), 0.06),
                ("rrsp".to_string(), 0.06),
                ("brokerage".to_string(), 0.06),
                ("crypto".to_string(), 0.10),
            ]),
            asset_appreciation: BTreeMap::from([
                ("real_estate".to_string(), 0.03),
                ("vehicle".to_string(), -0.15),
            ]),
            federal_tax_brackets: default_federal_brackets(),
            provincial_tax_brackets: default_provincial_brackets(),
            annual_salary: 0.0,
            annual_salary_growth: 0.02,
            monthly_expenses: 0.0,
            annual_expense_growth: 0.02,
            monthly_savings_rate: 0.5,
            savings_allocation: BTreeMap::new(),
            extra_debt_payments: BTreeMap::new(),
            events: Vec::new(),
        }
    }
}

/// Canadian federal brackets (2024)
pub fn default_federal_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(55_867.0, 0.15),
        TaxBracket::new(111_733.0, 0.205),
        TaxBracket::new(173_205.0, 0.26),
        TaxBracket::new(246_752.0, 0.29),
        TaxBracket::top(0.33),
    ]
}

/// Ontario provincial brackets (2024)
pub fn default_provincial_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(51_446.0, 0.0505),
        TaxBracket::new(102_894.0, 0.0915),
        TaxBracket::new(150_000.0, 0.1116),
        TaxBracket::new(220_000.0, 0.1216),
        TaxBracket::top(0.1316),
    ]
}

impl ProjectionConfig {
    /// Number of simulated months
    pub fn months(&self) -> usize {
        self.time_horizon_years as usize * 12
    }

    /// Start date, falling back to today
    pub fn resolved_start_date(&self) -> Date {
        self.start_date.unwrap_or_else(|| jiff::Zoned::now().date())
    }

    pub fn investment_return(&self, account_type: &str) -> f64 {
        self.investment_returns
            .get(account_type)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn appreciation(&self, asset_type: &str) -> f64 {
        self.asset_appreciation
            .get(asset_type)
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of allocation weights; anything short of 1.0 stays in cash
    pub fn allocated_share(&self) -> f64 {
        self.savings_allocation.values().sum()
    }
}

/// Everything one projection run consumes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub config: ProjectionConfig,
    #[serde(default)]
    pub accounts: Vec<AccountBalance>,
    #[serde(default)]
    pub debts: Vec<DebtAccount>,
}

impl ProjectionInput {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            config,
            accounts: Vec::new(),
            debts: Vec::new(),
        }
    }

    pub fn has_debt(&self, account_id: &AccountId) -> bool {
        self.debts.iter().any(|d| &d.id == account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let mut input = ProjectionInput::default();
        input.config.start_date = Some(jiff::civil::date(2025, 1, 1));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"{
            "config": {
                "start_date": "2025-03-01",
                "time_horizon_years": 5,
                "annual_salary": 72000,
                "monthly_expenses": 2500
            }
        }"#;
        let input: ProjectionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.config.time_horizon_years, 5);
        assert_eq!(input.config.annual_salary, 72_000.0);
        assert_eq!(input.config.federal_tax_brackets, default_federal_brackets());
        assert_eq!(input.config.investment_return("tfsa"), 0.06);
        assert_eq!(input.config.investment_return("unknown"), 0.0);
        assert!(input.accounts.is_empty());
        assert_eq!(input.config.months(), 60);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{
            "config": {
                "start_date": "2025-01-01",
                "events": [
                    {"id": "raise", "date": "2025-07-01", "type": "salary_change", "annual_salary": 90000},
                    {"id": "trip", "date": "2025-08-15", "type": "one_time_expense", "amount": 4000},
                    {"id": "bonus-rate", "date": "2025-09-01", "type": "savings_rate_change", "savings_rate": 0.9, "permanent": false}
                ]
            }
        }"#;
        let input: ProjectionInput = serde_json::from_str(json).unwrap();
        let events = &input.config.events;
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0].kind,
            crate::model::EventKind::SalaryChange {
                annual_salary: 90_000.0,
                permanent: true
            }
        );
        assert_eq!(
            events[2].kind,
            crate::model::EventKind::SavingsRateChange {
                savings_rate: 0.9,
                permanent: false
            }
        );
    }
}
