//! Event overlay: turns the dated event list into per-month parameters
//!
//! Events are bucketed by the month window they fall in once, up front. Each
//! simulated month then folds its bucket over the running baseline:
//! - one-time income/expense and extra debt payments only touch that month
//! - salary, expense-level and savings-rate changes replace the baseline from
//!   that month on, or override the month alone when not permanent
//!
//! Within a month, events apply in (date, input order); the last change of a
//! given parameter wins. Date is the primary key: a change dated later in the
//! month beats an earlier-dated one even when it comes first in the input.
//! Input order only breaks ties between events on the same date.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::date_math::window_step;
use crate::model::{AccountId, Event, EventKind};

/// Parameters carried from one month to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub annual_salary: f64,
    pub monthly_expenses: f64,
    pub savings_rate: f64,
}

/// Yearly growth applied on each anniversary of the start date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyGrowth {
    pub salary: f64,
    pub expenses: f64,
}

/// Parameters in force for a single month
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectiveParams {
    pub annual_salary: f64,
    pub monthly_expenses: f64,
    pub savings_rate: f64,
    pub one_time_income: f64,
    pub one_time_expenses: f64,
    pub extra_debt_payments: FxHashMap<AccountId, f64>,
}

impl EffectiveParams {
    pub fn extra_payment_for(&self, account_id: &AccountId) -> f64 {
        self.extra_debt_payments
            .get(account_id)
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ParamChange {
    /// Value used this month
    effective: Option<f64>,
    /// New baseline from this month on
    persistent: Option<f64>,
}

impl ParamChange {
    fn record(&mut self, value: f64, permanent: bool) {
        self.effective = Some(value);
        if permanent {
            self.persistent = Some(value);
        }
    }
}

/// Combined effect of every event in one month window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthOverlay {
    salary: ParamChange,
    expenses: ParamChange,
    savings_rate: ParamChange,
    one_time_income: f64,
    one_time_expenses: f64,
    extra_debt_payments: FxHashMap<AccountId, f64>,
}

impl MonthOverlay {
    /// Fold events in application order
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut overlay = Self::default();
        for event in events {
            match &event.kind {
                EventKind::OneTimeIncome { amount } => overlay.one_time_income += amount,
                EventKind::OneTimeExpense { amount } => overlay.one_time_expenses += amount,
                EventKind::ExtraDebtPayment { account_id, amount } => {
                    *overlay
                        .extra_debt_payments
                        .entry(account_id.clone())
                        .or_default() += amount;
                }
                EventKind::SalaryChange {
                    annual_salary,
                    permanent,
                } => overlay.salary.record(*annual_salary, *permanent),
                EventKind::ExpenseLevelChange {
                    monthly_expenses,
                    permanent,
                } => overlay.expenses.record(*monthly_expenses, *permanent),
                EventKind::SavingsRateChange {
                    savings_rate,
                    permanent,
                } => overlay.savings_rate.record(*savings_rate, *permanent),
            }
        }
        overlay
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Baseline {
    /// Advance the baseline into a new month and return that month's parameters.
    ///
    /// `growth` is applied first, except to a parameter that a permanent event
    /// replaces this month.
    pub fn advance(
        &mut self,
        overlay: &MonthOverlay,
        growth: Option<YearlyGrowth>,
    ) -> EffectiveParams {
        if let Some(growth) = growth {
            if overlay.salary.persistent.is_none() {
                self.annual_salary *= 1.0 + growth.salary;
            }
            if overlay.expenses.persistent.is_none() {
                self.monthly_expenses *= 1.0 + growth.expenses;
            }
        }

        if let Some(salary) = overlay.salary.persistent {
            self.annual_salary = salary;
        }
        if let Some(expenses) = overlay.expenses.persistent {
            self.monthly_expenses = expenses;
        }
        if let Some(rate) = overlay.savings_rate.persistent {
            self.savings_rate = rate;
        }

        EffectiveParams {
            annual_salary: overlay.salary.effective.unwrap_or(self.annual_salary),
            monthly_expenses: overlay.expenses.effective.unwrap_or(self.monthly_expenses),
            savings_rate: overlay.savings_rate.effective.unwrap_or(self.savings_rate),
            one_time_income: overlay.one_time_income,
            one_time_expenses: overlay.one_time_expenses,
            extra_debt_payments: overlay.extra_debt_payments.clone(),
        }
    }
}

/// Events bucketed by the simulation step they fire in
#[derive(Debug, Clone)]
pub struct EventSchedule {
    overlays: Vec<MonthOverlay>,
    empty: MonthOverlay,
}

impl EventSchedule {
    /// Bucket `events` against the point dates of a run.
    ///
    /// Events outside the timeline are dropped; validation rejects them before
    /// a run ever gets here.
    pub fn new(events: &[Event], dates: &[Date]) -> Self {
        let mut ordered: Vec<&Event> = events.iter().collect();
        // Stable: equal dates keep input order
        ordered.sort_by_key(|e| e.date);

        let mut buckets: Vec<Vec<&Event>> = vec![Vec::new(); dates.len()];
        for event in ordered {
            match window_step(dates, event.date) {
                Some(step) => buckets[step].push(event),
                None => tracing::warn!(
                    event_id = %event.id,
                    kind = event.kind.label(),
                    date = %event.date,
                    "event outside projection window ignored"
                ),
            }
        }

        Self {
            overlays: buckets
                .into_iter()
                .map(MonthOverlay::from_events)
                .collect(),
            empty: MonthOverlay::default(),
        }
    }

    /// Overlay for `step`; empty when nothing fires
    pub fn overlay(&self, step: usize) -> &MonthOverlay {
        self.overlays.get(step).unwrap_or(&self.empty)
    }

    /// Resolve the parameters of `step`, advancing `baseline`
    pub fn resolve(
        &self,
        step: usize,
        baseline: &mut Baseline,
        growth: Option<YearlyGrowth>,
    ) -> EffectiveParams {
        baseline.advance(self.overlay(step), growth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_math::month_dates;
    use jiff::civil::date;

    fn baseline() -> Baseline {
        Baseline {
            annual_salary: 60_000.0,
            monthly_expenses: 2_000.0,
            savings_rate: 0.5,
        }
    }

    #[test]
    fn test_no_events_returns_baseline() {
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::default(), None);
        assert_eq!(params.annual_salary, 60_000.0);
        assert_eq!(params.monthly_expenses, 2_000.0);
        assert_eq!(params.savings_rate, 0.5);
        assert_eq!(params.one_time_income, 0.0);
        assert_eq!(base, baseline());
    }

    #[test]
    fn test_one_time_events_do_not_persist() {
        let d = date(2025, 3, 1);
        let events = [
            Event::one_time_income("bonus", d, 5_000.0),
            Event::one_time_income("gift", d, 1_000.0),
            Event::one_time_expense("roof", d, 12_000.0),
            Event::extra_debt_payment("lump", d, "mortgage", 10_000.0),
        ];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), None);
        assert_eq!(params.one_time_income, 6_000.0);
        assert_eq!(params.one_time_expenses, 12_000.0);
        assert_eq!(params.extra_payment_for(&AccountId::new("mortgage")), 10_000.0);
        assert_eq!(params.extra_payment_for(&AccountId::new("car")), 0.0);

        let next = base.advance(&MonthOverlay::default(), None);
        assert_eq!(next.one_time_income, 0.0);
        assert_eq!(next.extra_payment_for(&AccountId::new("mortgage")), 0.0);
    }

    #[test]
    fn test_permanent_change_persists() {
        let events = [Event::salary_change("raise", date(2025, 6, 1), 75_000.0)];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), None);
        assert_eq!(params.annual_salary, 75_000.0);
        assert_eq!(base.annual_salary, 75_000.0);
    }

    #[test]
    fn test_one_month_override_reverts() {
        let events =
            [Event::expense_level_change("holidays", date(2025, 12, 1), 4_000.0).for_one_month()];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), None);
        assert_eq!(params.monthly_expenses, 4_000.0);
        assert_eq!(base.monthly_expenses, 2_000.0);
    }

    #[test]
    fn test_last_change_wins() {
        let d = date(2025, 6, 1);
        let events = [
            Event::savings_rate_change("a", d, 0.2),
            Event::savings_rate_change("b", d, 0.8),
        ];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), None);
        assert_eq!(params.savings_rate, 0.8);
        assert_eq!(base.savings_rate, 0.8);
    }

    #[test]
    fn test_override_after_permanent_keeps_permanent_baseline() {
        let d = date(2025, 6, 1);
        let events = [
            Event::salary_change("new-job", d, 90_000.0),
            Event::salary_change("unpaid-leave", d, 0.0).for_one_month(),
        ];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), None);
        assert_eq!(params.annual_salary, 0.0);
        assert_eq!(base.annual_salary, 90_000.0);
    }

    #[test]
    fn test_growth_skipped_for_replaced_parameter() {
        let growth = Some(YearlyGrowth {
            salary: 0.10,
            expenses: 0.05,
        });
        let events = [Event::salary_change("raise", date(2026, 1, 1), 70_000.0)];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), growth);
        assert_eq!(params.annual_salary, 70_000.0);
        assert!((params.monthly_expenses - 2_100.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_applies_under_one_month_override() {
        let growth = Some(YearlyGrowth {
            salary: 0.10,
            expenses: 0.0,
        });
        let events = [Event::salary_change("sabbatical", date(2026, 1, 1), 0.0).for_one_month()];
        let mut base = baseline();
        let params = base.advance(&MonthOverlay::from_events(&events), growth);
        assert_eq!(params.annual_salary, 0.0);
        assert!((base.annual_salary - 66_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_orders_by_date_then_input() {
        let dates = month_dates(date(2025, 1, 1), 12);
        // Same window; the later-dated change wins even though it comes first
        let events = vec![
            Event::salary_change("late", date(2025, 3, 20), 80_000.0),
            Event::salary_change("early", date(2025, 3, 2), 70_000.0),
        ];
        let schedule = EventSchedule::new(&events, &dates);
        let mut base = baseline();
        let params = schedule.resolve(3, &mut base, None);
        assert_eq!(params.annual_salary, 80_000.0);

        // Equal dates: input order decides
        let events = vec![
            Event::salary_change("first", date(2025, 3, 2), 70_000.0),
            Event::salary_change("second", date(2025, 3, 2), 65_000.0),
        ];
        let schedule = EventSchedule::new(&events, &dates);
        let mut base = baseline();
        let params = schedule.resolve(3, &mut base, None);
        assert_eq!(params.annual_salary, 65_000.0);
    }

    #[test]
    fn test_schedule_buckets_by_window() {
        let dates = month_dates(date(2025, 1, 1), 12);
        let events = vec![Event::one_time_income("bonus", date(2025, 2, 14), 3_000.0)];
        let schedule = EventSchedule::new(&events, &dates);
        assert!(schedule.overlay(1).is_empty());
        assert!(!schedule.overlay(2).is_empty());
        assert!(schedule.overlay(3).is_empty());
        assert!(schedule.overlay(99).is_empty());
    }
}
