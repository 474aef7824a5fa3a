//! Fixed-payment loan amortization
//!
//! The projection steps monthly, so every debt is charged its
//! monthly-equivalent payment and accrues interest at `annual_rate / 12`,
//! whatever its real payment frequency.

use crate::model::PaymentFrequency;

/// Balances within this distance of zero are treated as paid off
pub const PAYOFF_TOLERANCE: f64 = 1e-6;

/// Split of one month's debt payment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyPayment {
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub new_balance: f64,
}

impl MonthlyPayment {
    /// Cash that left the household for this debt
    pub fn total_paid(&self) -> f64 {
        self.principal_paid + self.interest_paid
    }

    pub fn paid_off(&self) -> bool {
        self.new_balance == 0.0
    }
}

/// Per-period payment that retires `principal` over `term_months`.
///
/// Standard annuity: `P * r / (1 - (1 + r)^-n)` with `r` the periodic rate and
/// `n` the number of periods; `P / n` when the rate is zero. Accelerated
/// frequencies pay a fraction of the monthly payment instead.
pub fn scheduled_payment(
    principal: f64,
    annual_rate: f64,
    term_months: u32,
    frequency: PaymentFrequency,
) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }

    if let Some(divisor) = frequency.accelerated_divisor() {
        return scheduled_payment(principal, annual_rate, term_months, PaymentFrequency::Monthly)
            / divisor;
    }

    let periods_per_year = frequency.periods_per_year();
    let n = (term_months as f64 * periods_per_year / 12.0).round().max(1.0);
    let r = annual_rate / periods_per_year;

    if r.abs() < f64::EPSILON {
        principal / n
    } else {
        principal * r / (1.0 - (1.0 + r).powf(-n))
    }
}

/// Average amount a per-period payment costs per month
pub fn monthly_equivalent(payment: f64, frequency: PaymentFrequency) -> f64 {
    payment * frequency.periods_per_year() / 12.0
}

/// Advance a debt by one month.
///
/// Interest accrues on the opening balance; everything paid beyond it reduces
/// principal. Principal is clamped to the balance, so the final month closes
/// the debt at exactly zero and charges only what was owed. A payment below
/// the interest grows the balance.
pub fn apply_month(
    balance: f64,
    annual_rate: f64,
    payment: f64,
    extra_payment: f64,
) -> MonthlyPayment {
    if balance <= PAYOFF_TOLERANCE {
        return MonthlyPayment::default();
    }

    let interest_paid = balance * annual_rate / 12.0;
    let principal = payment - interest_paid + extra_payment;

    if principal >= balance - PAYOFF_TOLERANCE {
        MonthlyPayment {
            principal_paid: balance,
            interest_paid,
            new_balance: 0.0,
        }
    } else {
        MonthlyPayment {
            principal_paid: principal,
            interest_paid,
            new_balance: balance - principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_annuity_payment() {
        let payment = scheduled_payment(100_000.0, 0.06, 120, PaymentFrequency::Monthly);
        assert!((payment - 1_110.21).abs() < 0.01, "got {payment}");
    }

    #[test]
    fn test_zero_rate_payment() {
        let payment = scheduled_payment(12_000.0, 0.0, 24, PaymentFrequency::Monthly);
        assert!((payment - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_principal_no_payment() {
        assert_eq!(scheduled_payment(0.0, 0.05, 60, PaymentFrequency::Monthly), 0.0);
    }

    #[test]
    fn test_bi_weekly_payment() {
        // 26 periods/year over 10 years = 260 payments at 6%/26
        let payment = scheduled_payment(100_000.0, 0.06, 120, PaymentFrequency::BiWeekly);
        let r: f64 = 0.06 / 26.0;
        let expected = 100_000.0 * r / (1.0 - (1.0 + r).powf(-260.0));
        assert!((payment - expected).abs() < 1e-9);
        // Slightly less than half the monthly payment
        assert!(payment < 1_110.21 / 2.0);
    }

    #[test]
    fn test_accelerated_payments() {
        let monthly = scheduled_payment(300_000.0, 0.05, 300, PaymentFrequency::Monthly);
        let acc_bw = scheduled_payment(300_000.0, 0.05, 300, PaymentFrequency::AcceleratedBiWeekly);
        let acc_w = scheduled_payment(300_000.0, 0.05, 300, PaymentFrequency::AcceleratedWeekly);
        assert!((acc_bw - monthly / 2.0).abs() < 1e-9);
        assert!((acc_w - monthly / 4.0).abs() < 1e-9);

        // Accelerated bi-weekly pays the equivalent of 13 monthly payments a year
        let per_month = monthly_equivalent(acc_bw, PaymentFrequency::AcceleratedBiWeekly);
        assert!((per_month - monthly * 13.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_month_split() {
        let step = apply_month(100_000.0, 0.06, 1_110.21, 0.0);
        assert!((step.interest_paid - 500.0).abs() < 1e-9);
        assert!((step.principal_paid - 610.21).abs() < 1e-9);
        assert!((step.new_balance - 99_389.79).abs() < 1e-6);
        assert!(!step.paid_off());
    }

    #[test]
    fn test_apply_month_extra_payment() {
        let step = apply_month(10_000.0, 0.0, 500.0, 250.0);
        assert!((step.principal_paid - 750.0).abs() < 1e-9);
        assert!((step.new_balance - 9_250.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_month_clamps_final_payment() {
        let step = apply_month(300.0, 0.12, 500.0, 1_000.0);
        assert_eq!(step.principal_paid, 300.0);
        assert!((step.interest_paid - 3.0).abs() < 1e-9);
        assert_eq!(step.new_balance, 0.0);
        assert!(step.paid_off());
        assert!((step.total_paid() - 303.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_month_on_paid_off_debt() {
        let step = apply_month(0.0, 0.05, 1_000.0, 500.0);
        assert_eq!(step, MonthlyPayment::default());
        assert_eq!(step.total_paid(), 0.0);
    }

    #[test]
    fn test_payment_below_interest_grows_balance() {
        let step = apply_month(10_000.0, 0.24, 100.0, 0.0);
        assert!((step.interest_paid - 200.0).abs() < 1e-9);
        assert!(step.new_balance > 10_000.0);
    }

    #[test]
    fn test_full_term_reaches_zero() {
        let principal = 100_000.0;
        let payment = scheduled_payment(principal, 0.06, 120, PaymentFrequency::Monthly);
        let mut balance = principal;
        let mut total_principal = 0.0;

        for month in 1..=120 {
            let step = apply_month(balance, 0.06, payment, 0.0);
            total_principal += step.principal_paid;
            balance = step.new_balance;
            if month < 120 {
                assert!(balance > 0.0, "paid off early at month {month}");
            }
        }

        assert_eq!(balance, 0.0);
        assert!((total_principal - principal).abs() < 1e-6);
    }
}
