//! Account and debt definitions
//!
//! Accounts hold value that grows or shrinks each month (cash, investments,
//! physical assets). Debts are kept apart and always carry a POSITIVE
//! balance: the amount still owed. Only presentation layers flip the sign.

use super::ids::AccountId;
use serde::{Deserialize, Serialize};

/// How an account participates in the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Checking, savings, HISA. Surpluses land here and shortfalls come out.
    Cash,
    /// TFSA, RRSP, brokerage, crypto. Receives allocated savings.
    Investment,
    /// Real estate, vehicles. Appreciates or depreciates, never receives savings.
    Asset,
}

/// Current balance of a non-liability account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: AccountCategory,
    /// Key into `investment_returns` (cash/investment) or `asset_appreciation` (asset)
    pub account_type: String,
    pub balance: f64,
}

impl AccountBalance {
    pub fn new(
        id: impl Into<String>,
        category: AccountCategory,
        account_type: impl Into<String>,
        balance: f64,
    ) -> Self {
        Self {
            id: AccountId::new(id),
            name: None,
            category,
            account_type: account_type.into(),
            balance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    Mortgage,
    AutoLoan,
    StudentLoan,
    CreditCard,
    LineOfCredit,
    #[default]
    Other,
}

/// How often a loan payment is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    SemiMonthly,
    BiWeekly,
    /// Half the monthly payment, 26 times a year
    AcceleratedBiWeekly,
    Weekly,
    /// A quarter of the monthly payment, 52 times a year
    AcceleratedWeekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(self) -> f64 {
        match self {
            PaymentFrequency::Monthly => 12.0,
            PaymentFrequency::SemiMonthly => 24.0,
            PaymentFrequency::BiWeekly | PaymentFrequency::AcceleratedBiWeekly => 26.0,
            PaymentFrequency::Weekly | PaymentFrequency::AcceleratedWeekly => 52.0,
        }
    }

    /// For accelerated schedules, the divisor applied to the monthly payment
    pub fn accelerated_divisor(self) -> Option<f64> {
        match self {
            PaymentFrequency::AcceleratedBiWeekly => Some(2.0),
            PaymentFrequency::AcceleratedWeekly => Some(4.0),
            _ => None,
        }
    }
}

/// A loan or revolving debt the projection pays down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: DebtKind,
    /// Amount still owed (positive)
    pub balance: f64,
    pub annual_rate: f64,
    pub remaining_term_months: u32,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    /// Fixed per-period payment; derived from the annuity formula when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<f64>,
}

impl DebtAccount {
    pub fn new(
        id: impl Into<String>,
        balance: f64,
        annual_rate: f64,
        remaining_term_months: u32,
    ) -> Self {
        Self {
            id: AccountId::new(id),
            name: None,
            kind: DebtKind::Other,
            balance,
            annual_rate,
            remaining_term_months,
            frequency: PaymentFrequency::Monthly,
            payment: None,
        }
    }
}
