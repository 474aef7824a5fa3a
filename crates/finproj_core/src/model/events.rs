//! Dated life events that overlay the projection baseline
//!
//! One-time events touch only the month they fall in. Change events replace
//! the running baseline from their month forward unless marked non-permanent,
//! in which case they override the value for their month only.

use super::ids::{AccountId, EventId};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A dated override to the projection's baseline parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub date: Date,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Bonus, inheritance, asset sale proceeds
    OneTimeIncome { amount: f64 },
    /// Wedding, car repair, down payment
    OneTimeExpense { amount: f64 },
    /// Lump-sum principal prepayment on one debt
    ExtraDebtPayment { account_id: AccountId, amount: f64 },
    SalaryChange {
        annual_salary: f64,
        #[serde(default = "default_true")]
        permanent: bool,
    },
    ExpenseLevelChange {
        monthly_expenses: f64,
        #[serde(default = "default_true")]
        permanent: bool,
    },
    SavingsRateChange {
        savings_rate: f64,
        #[serde(default = "default_true")]
        permanent: bool,
    },
}

impl Event {
    pub fn new(id: impl Into<String>, date: Date, kind: EventKind) -> Self {
        Self {
            id: EventId::new(id),
            date,
            kind,
        }
    }

    pub fn one_time_income(id: impl Into<String>, date: Date, amount: f64) -> Self {
        Self::new(id, date, EventKind::OneTimeIncome { amount })
    }

    pub fn one_time_expense(id: impl Into<String>, date: Date, amount: f64) -> Self {
        Self::new(id, date, EventKind::OneTimeExpense { amount })
    }

    pub fn extra_debt_payment(
        id: impl Into<String>,
        date: Date,
        account_id: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self::new(
            id,
            date,
            EventKind::ExtraDebtPayment {
                account_id: AccountId::new(account_id),
                amount,
            },
        )
    }

    pub fn salary_change(id: impl Into<String>, date: Date, annual_salary: f64) -> Self {
        Self::new(
            id,
            date,
            EventKind::SalaryChange {
                annual_salary,
                permanent: true,
            },
        )
    }

    pub fn expense_level_change(id: impl Into<String>, date: Date, monthly_expenses: f64) -> Self {
        Self::new(
            id,
            date,
            EventKind::ExpenseLevelChange {
                monthly_expenses,
                permanent: true,
            },
        )
    }

    pub fn savings_rate_change(id: impl Into<String>, date: Date, savings_rate: f64) -> Self {
        Self::new(
            id,
            date,
            EventKind::SavingsRateChange {
                savings_rate,
                permanent: true,
            },
        )
    }

    /// Turn a change event into a one-month override. No effect on one-time events.
    #[must_use]
    pub fn for_one_month(mut self) -> Self {
        match &mut self.kind {
            EventKind::SalaryChange { permanent, .. }
            | EventKind::ExpenseLevelChange { permanent, .. }
            | EventKind::SavingsRateChange { permanent, .. } => *permanent = false,
            _ => {}
        }
        self
    }
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::OneTimeIncome { .. } => "one_time_income",
            EventKind::OneTimeExpense { .. } => "one_time_expense",
            EventKind::ExtraDebtPayment { .. } => "extra_debt_payment",
            EventKind::SalaryChange { .. } => "salary_change",
            EventKind::ExpenseLevelChange { .. } => "expense_level_change",
            EventKind::SavingsRateChange { .. } => "savings_rate_change",
        }
    }
}
