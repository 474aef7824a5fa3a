//! Projection Builder
//!
//! Fluent construction of a [`ProjectionInput`], mostly for tests, benches and
//! embedding callers that don't go through JSON.
//!
//! # Example
//!
//! ```ignore
//! use finproj_core::config::ProjectionBuilder;
//! use finproj_core::model::{DebtAccount, Event};
//!
//! let input = ProjectionBuilder::new()
//!     .start(2025, 1, 1)
//!     .years(25)
//!     .salary(110_000.0)
//!     .monthly_expenses(4_200.0)
//!     .cash("chequing", 8_000.0)
//!     .investment("tfsa", "tfsa", 40_000.0)
//!     .asset("house", "real_estate", 650_000.0)
//!     .debt(DebtAccount::new("mortgage", 480_000.0, 0.049, 300))
//!     .allocate("tfsa", 1.0)
//!     .event(Event::one_time_expense("roof", jiff::civil::date(2031, 5, 1), 18_000.0))
//!     .build();
//! ```

use jiff::civil::Date;

use super::{ProjectionConfig, ProjectionInput};
use crate::model::{AccountBalance, AccountCategory, AccountId, DebtAccount, Event, TaxBracket};

/// Builder for projection inputs, starting from [`ProjectionConfig::default`]
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    input: ProjectionInput,
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Timeline
    // =========================================================================

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.input.config.start_date = Some(date);
        self
    }

    /// Set the start date (convenience method)
    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn years(mut self, years: u32) -> Self {
        self.input.config.time_horizon_years = years;
        self
    }

    // =========================================================================
    // Household
    // =========================================================================

    #[must_use]
    pub fn salary(mut self, annual_salary: f64) -> Self {
        self.input.config.annual_salary = annual_salary;
        self
    }

    #[must_use]
    pub fn salary_growth(mut self, rate: f64) -> Self {
        self.input.config.annual_salary_growth = rate;
        self
    }

    #[must_use]
    pub fn monthly_expenses(mut self, amount: f64) -> Self {
        self.input.config.monthly_expenses = amount;
        self
    }

    #[must_use]
    pub fn expense_growth(mut self, rate: f64) -> Self {
        self.input.config.annual_expense_growth = rate;
        self
    }

    /// Set both yearly growth rates to zero
    #[must_use]
    pub fn no_growth(self) -> Self {
        self.salary_growth(0.0).expense_growth(0.0)
    }

    // =========================================================================
    // Economy
    // =========================================================================

    #[must_use]
    pub fn inflation(mut self, rate: f64) -> Self {
        self.input.config.inflation_rate = rate;
        self
    }

    #[must_use]
    pub fn federal_brackets(mut self, brackets: Vec<TaxBracket>) -> Self {
        self.input.config.federal_tax_brackets = brackets;
        self
    }

    #[must_use]
    pub fn provincial_brackets(mut self, brackets: Vec<TaxBracket>) -> Self {
        self.input.config.provincial_tax_brackets = brackets;
        self
    }

    /// Replace both schedules with a single 0% bracket
    #[must_use]
    pub fn no_tax(self) -> Self {
        self.federal_brackets(vec![TaxBracket::top(0.0)])
            .provincial_brackets(vec![TaxBracket::top(0.0)])
    }

    #[must_use]
    pub fn investment_return(mut self, account_type: impl Into<String>, rate: f64) -> Self {
        self.input
            .config
            .investment_returns
            .insert(account_type.into(), rate);
        self
    }

    #[must_use]
    pub fn asset_appreciation(mut self, asset_type: impl Into<String>, rate: f64) -> Self {
        self.input
            .config
            .asset_appreciation
            .insert(asset_type.into(), rate);
        self
    }

    // =========================================================================
    // Plan
    // =========================================================================

    #[must_use]
    pub fn savings_rate(mut self, rate: f64) -> Self {
        self.input.config.monthly_savings_rate = rate;
        self
    }

    /// Send `weight` of invested savings to accounts of `account_type`
    #[must_use]
    pub fn allocate(mut self, account_type: impl Into<String>, weight: f64) -> Self {
        self.input
            .config
            .savings_allocation
            .insert(account_type.into(), weight);
        self
    }

    #[must_use]
    pub fn extra_debt_payment(mut self, account_id: impl Into<String>, amount: f64) -> Self {
        self.input
            .config
            .extra_debt_payments
            .insert(AccountId::new(account_id), amount);
        self
    }

    #[must_use]
    pub fn event(mut self, event: Event) -> Self {
        self.input.config.events.push(event);
        self
    }

    // =========================================================================
    // Balances
    // =========================================================================

    #[must_use]
    pub fn account(mut self, account: AccountBalance) -> Self {
        self.input.accounts.push(account);
        self
    }

    #[must_use]
    pub fn cash(self, id: impl Into<String>, balance: f64) -> Self {
        self.account(AccountBalance::new(id, AccountCategory::Cash, "cash", balance))
    }

    #[must_use]
    pub fn investment(
        self,
        id: impl Into<String>,
        account_type: impl Into<String>,
        balance: f64,
    ) -> Self {
        self.account(AccountBalance::new(
            id,
            AccountCategory::Investment,
            account_type,
            balance,
        ))
    }

    #[must_use]
    pub fn asset(self, id: impl Into<String>, asset_type: impl Into<String>, value: f64) -> Self {
        self.account(AccountBalance::new(
            id,
            AccountCategory::Asset,
            asset_type,
            value,
        ))
    }

    #[must_use]
    pub fn debt(mut self, debt: DebtAccount) -> Self {
        self.input.debts.push(debt);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Finish without validating; `project` validates before running
    pub fn build(self) -> ProjectionInput {
        self.input
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.input.config
    }
}
