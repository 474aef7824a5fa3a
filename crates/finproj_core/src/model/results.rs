//! Projection output series
//!
//! Every series holds one point per month of the horizon, month 0 included,
//! and all series share the same dates.

use std::collections::BTreeMap;

use super::ids::AccountId;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub date: Date,
    pub value: f64,
}

/// Cash flow of the month ending at `date`
///
/// `income` is take-home income, so `net == income - expenses`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub date: Date,
    pub gross_income: f64,
    pub taxes: f64,
    pub income: f64,
    /// Living expenses, one-time expenses and debt payments actually made
    pub expenses: f64,
    /// Portion of the surplus moved into investment accounts
    pub savings: f64,
    pub net: f64,
}

impl CashFlowPoint {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            gross_income: 0.0,
            taxes: 0.0,
            income: 0.0,
            expenses: 0.0,
            savings: 0.0,
            net: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffPoint {
    pub date: Date,
    pub total_debt: f64,
    pub debts: BTreeMap<AccountId, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalancesPoint {
    pub date: Date,
    pub balances: BTreeMap<AccountId, f64>,
}

/// Headline numbers derived from the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub start_date: Date,
    pub end_date: Date,
    pub final_net_worth: f64,
    pub final_real_net_worth: f64,
    pub total_taxes: f64,
    pub total_interest: f64,
    pub total_invested: f64,
    /// First month-end with no debt left; `None` if debt remains at the horizon
    pub debt_free_date: Option<Date>,
    pub debt_payoff_dates: BTreeMap<AccountId, Date>,
}

/// Complete result of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResponse {
    pub net_worth: Vec<ValuePoint>,
    /// Net worth in start-date dollars
    pub real_net_worth: Vec<ValuePoint>,
    pub assets: Vec<ValuePoint>,
    /// Positive magnitude of everything owed
    pub liabilities: Vec<ValuePoint>,
    pub cash_flow: Vec<CashFlowPoint>,
    pub debt_payoff: Vec<DebtPayoffPoint>,
    pub account_balances: Vec<AccountBalancesPoint>,
    pub summary: ProjectionSummary,
}

impl ProjectionResponse {
    /// Number of points in each series
    pub fn len(&self) -> usize {
        self.net_worth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.net_worth.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.net_worth.iter().map(|p| p.date)
    }

    pub fn final_net_worth(&self) -> f64 {
        self.summary.final_net_worth
    }

    pub fn final_liabilities(&self) -> f64 {
        self.liabilities.last().map(|p| p.value).unwrap_or(0.0)
    }

    /// Balance of an account at month `month`, if both exist
    pub fn account_balance(&self, account_id: &AccountId, month: usize) -> Option<f64> {
        self.account_balances
            .get(month)
            .and_then(|p| p.balances.get(account_id))
            .copied()
    }

    /// Balance owed on a debt at month `month`, if both exist
    pub fn debt_balance(&self, account_id: &AccountId, month: usize) -> Option<f64> {
        self.debt_payoff
            .get(month)
            .and_then(|p| p.debts.get(account_id))
            .copied()
    }
}
