use std::collections::BTreeMap;

use crate::amortization::{self, MonthlyPayment, PAYOFF_TOLERANCE};
use crate::apply::{Baseline, EffectiveParams};
use crate::config::ProjectionInput;
use crate::date_math::month_dates;
use crate::growth;
use crate::model::{AccountCategory, AccountId};
use jiff::civil::Date;

/// Prefix of every account id the projection creates on its own
pub const SYNTHETIC_ID_PREFIX: &str = "projected-";
/// Id of the cash account created when the input has none
pub const SYNTHETIC_CASH_ID: &str = "projected-cash";

/// Runtime state for one projection run, mutated month by month
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub timeline: SimTimeline,
    pub portfolio: SimPortfolio,
    pub debts: Vec<DebtState>,
    pub baseline: Baseline,
    pub totals: RunningTotals,
}

#[derive(Debug, Clone)]
pub struct SimTimeline {
    pub start_date: Date,
    /// Point dates, month 0 included
    pub dates: Vec<Date>,
}

#[derive(Debug, Clone)]
pub struct SimPortfolio {
    /// Input accounts in input order, followed by synthetic ones
    pub accounts: Vec<AccountState>,
    /// Index of the account that absorbs surpluses and shortfalls
    pub cash_index: usize,
    pub allocation: Vec<AllocationTarget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub id: AccountId,
    pub category: AccountCategory,
    pub account_type: String,
    pub annual_rate: f64,
    pub balance: f64,
}

/// Accounts receiving `weight` of every invested dollar, split equally
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationTarget {
    pub account_type: String,
    pub weight: f64,
    pub accounts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtState {
    pub id: AccountId,
    /// Positive amount owed
    pub balance: f64,
    pub annual_rate: f64,
    /// Monthly equivalent of the scheduled payment
    pub monthly_payment: f64,
    /// Standing extra principal from `extra_debt_payments`
    pub standing_extra: f64,
    pub payoff_date: Option<Date>,
}

impl DebtState {
    pub fn is_paid_off(&self) -> bool {
        self.balance <= PAYOFF_TOLERANCE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningTotals {
    pub taxes: f64,
    pub interest: f64,
    pub invested: f64,
}

impl SimulationState {
    pub fn from_input(input: &ProjectionInput, start_date: Date) -> Self {
        let config = &input.config;

        let mut accounts: Vec<AccountState> = input
            .accounts
            .iter()
            .map(|a| AccountState {
                id: a.id.clone(),
                category: a.category,
                account_type: a.account_type.clone(),
                annual_rate: match a.category {
                    AccountCategory::Asset => config.appreciation(&a.account_type),
                    AccountCategory::Cash | AccountCategory::Investment => {
                        config.investment_return(&a.account_type)
                    }
                },
                balance: a.balance,
            })
            .collect();

        let cash_index = match accounts
            .iter()
            .position(|a| a.category == AccountCategory::Cash)
        {
            Some(index) => index,
            None => {
                accounts.push(AccountState {
                    id: AccountId::new(SYNTHETIC_CASH_ID),
                    category: AccountCategory::Cash,
                    account_type: "cash".to_string(),
                    annual_rate: config.investment_return("cash"),
                    balance: 0.0,
                });
                accounts.len() - 1
            }
        };

        let mut allocation = Vec::new();
        for (account_type, &weight) in &config.savings_allocation {
            if weight <= 0.0 {
                continue;
            }
            let mut targets: Vec<usize> = accounts
                .iter()
                .enumerate()
                .filter(|(_, a)| {
                    a.category == AccountCategory::Investment && &a.account_type == account_type
                })
                .map(|(i, _)| i)
                .collect();
            if targets.is_empty() {
                tracing::debug!(
                    account_type = %account_type,
                    "no account for allocation, adding synthetic one"
                );
                accounts.push(AccountState {
                    id: AccountId::new(format!("{SYNTHETIC_ID_PREFIX}{account_type}")),
                    category: AccountCategory::Investment,
                    account_type: account_type.clone(),
                    annual_rate: config.investment_return(account_type),
                    balance: 0.0,
                });
                targets.push(accounts.len() - 1);
            }
            allocation.push(AllocationTarget {
                account_type: account_type.clone(),
                weight,
                accounts: targets,
            });
        }

        let debts = input
            .debts
            .iter()
            .map(|d| {
                let payment = d.payment.unwrap_or_else(|| {
                    amortization::scheduled_payment(
                        d.balance,
                        d.annual_rate,
                        d.remaining_term_months,
                        d.frequency,
                    )
                });
                DebtState {
                    id: d.id.clone(),
                    balance: d.balance,
                    annual_rate: d.annual_rate,
                    monthly_payment: amortization::monthly_equivalent(payment, d.frequency),
                    standing_extra: config.extra_debt_payments.get(&d.id).copied().unwrap_or(0.0),
                    payoff_date: (d.balance <= PAYOFF_TOLERANCE).then_some(start_date),
                }
            })
            .collect();

        Self {
            timeline: SimTimeline {
                start_date,
                dates: month_dates(start_date, config.months()),
            },
            portfolio: SimPortfolio {
                accounts,
                cash_index,
                allocation,
            },
            debts,
            baseline: Baseline {
                annual_salary: config.annual_salary,
                monthly_expenses: config.monthly_expenses,
                savings_rate: config.monthly_savings_rate,
            },
            totals: RunningTotals::default(),
        }
    }

    // =========================================================================
    // Monthly mutations
    // =========================================================================

    /// Charge every open debt its payment for the month ending at `date`.
    ///
    /// Returns the cash that left the household.
    pub fn pay_debts(&mut self, params: &EffectiveParams, date: Date) -> f64 {
        let mut paid = 0.0;
        for debt in &mut self.debts {
            if debt.is_paid_off() {
                continue;
            }
            let extra = debt.standing_extra + params.extra_payment_for(&debt.id);
            let MonthlyPayment {
                principal_paid,
                interest_paid,
                new_balance,
            } = amortization::apply_month(
                debt.balance,
                debt.annual_rate,
                debt.monthly_payment,
                extra,
            );

            debt.balance = new_balance;
            paid += principal_paid + interest_paid;
            self.totals.interest += interest_paid;

            if new_balance == 0.0 {
                debt.payoff_date = Some(date);
                tracing::debug!(debt = %debt.id, %date, "debt paid off");
            }
        }
        paid
    }

    /// Move `amount` into investment accounts by allocation weight.
    ///
    /// Returns what was actually invested; the unallocated share is left for
    /// the caller to keep in cash.
    pub fn invest(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let mut invested = 0.0;
        for target in &self.portfolio.allocation {
            let share = amount * target.weight;
            let per_account = share / target.accounts.len() as f64;
            for &index in &target.accounts {
                self.portfolio.accounts[index].balance += per_account;
            }
            invested += share;
        }
        self.totals.invested += invested;
        invested
    }

    /// Add `amount` (possibly negative) to the primary cash account
    pub fn adjust_cash(&mut self, amount: f64) {
        let index = self.portfolio.cash_index;
        self.portfolio.accounts[index].balance += amount;
    }

    /// One month of return or appreciation on every account
    pub fn grow_accounts(&mut self) {
        for account in &mut self.portfolio.accounts {
            account.balance = growth::grow(account.balance, account.annual_rate);
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn cash_balance(&self) -> f64 {
        self.portfolio.accounts[self.portfolio.cash_index].balance
    }

    pub fn assets(&self) -> f64 {
        self.portfolio.accounts.iter().map(|a| a.balance).sum()
    }

    pub fn liabilities(&self) -> f64 {
        self.debts.iter().map(|d| d.balance).sum()
    }

    pub fn net_worth(&self) -> f64 {
        self.assets() - self.liabilities()
    }

    pub fn account_balances(&self) -> BTreeMap<AccountId, f64> {
        self.portfolio
            .accounts
            .iter()
            .map(|a| (a.id.clone(), a.balance))
            .collect()
    }

    pub fn debt_balances(&self) -> BTreeMap<AccountId, f64> {
        self.debts
            .iter()
            .map(|d| (d.id.clone(), d.balance))
            .collect()
    }

    /// First date on which every debt was closed, if all are
    pub fn debt_free_date(&self) -> Option<Date> {
        self.debts
            .iter()
            .map(|d| d.payoff_date)
            .try_fold(self.timeline.start_date, |latest, payoff| {
                payoff.map(|date| latest.max(date))
            })
    }
}
