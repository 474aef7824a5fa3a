//! Property-based checks of taxes, amortization, growth and series shape

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

use super::flat_builder;
use crate::amortization::{apply_month, scheduled_payment};
use crate::config::default_federal_brackets;
use crate::growth::grow;
use crate::model::{PaymentFrequency, TaxBracket};
use crate::simulation::project;
use crate::taxes::TaxSchedule;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_tax_is_monotonic(a in 0.0f64..400_000.0, delta in 0.0f64..100_000.0) {
        let brackets = default_federal_brackets();
        let schedule = TaxSchedule::new(&brackets, "federal_tax_brackets").unwrap();
        prop_assert!(schedule.tax_on(a) <= schedule.tax_on(a + delta));
    }

    #[test]
    fn prop_tax_is_continuous_at_boundaries(index in 0usize..4, epsilon in 1e-6f64..1e-2) {
        let brackets = default_federal_brackets();
        let schedule = TaxSchedule::new(&brackets, "federal_tax_brackets").unwrap();
        let boundary = brackets[index].up_to_income;
        let above_rate = brackets[index + 1].rate;

        let at = schedule.tax_on(boundary);
        let above = schedule.tax_on(boundary + epsilon);
        prop_assert!((above - (at + above_rate * epsilon)).abs() < 1e-6);
    }

    #[test]
    fn prop_tax_never_exceeds_income(income in 0.0f64..1_000_000.0, rate in 0.0f64..=1.0) {
        let brackets = [TaxBracket::new(50_000.0, rate / 2.0), TaxBracket::top(rate)];
        let schedule = TaxSchedule::new(&brackets, "tax_brackets").unwrap();
        let tax = schedule.tax_on(income);
        prop_assert!(tax >= 0.0);
        prop_assert!(tax <= income * rate + 1e-9);
    }

    #[test]
    fn prop_amortization_conserves_principal(
        principal in 1_000.0f64..1_000_000.0,
        rate in 0.0f64..0.15,
        term in 1u32..=360,
    ) {
        let payment = scheduled_payment(principal, rate, term, PaymentFrequency::Monthly);
        let mut balance = principal;
        let mut principal_paid = 0.0;
        for _ in 0..term {
            let month = apply_month(balance, rate, payment, 0.0);
            principal_paid += month.principal_paid;
            balance = month.new_balance;
        }
        prop_assert_eq!(balance, 0.0);
        prop_assert!((principal_paid - principal).abs() < 1e-6 * principal.max(1.0));
    }

    #[test]
    fn prop_zero_growth_is_identity(balance in -1e7f64..1e7, rate in -0.99f64..1.0) {
        let grown = grow(balance, rate);
        prop_assert_eq!(grow(grown, 0.0), grown);
    }

    #[test]
    fn prop_series_length(years in 1u32..=30, salary in 0.0f64..200_000.0) {
        let input = flat_builder()
            .years(years)
            .salary(salary)
            .monthly_expenses(2_000.0)
            .build();
        let response = project(&input).unwrap();
        let expected = years as usize * 12 + 1;
        prop_assert_eq!(response.len(), expected);
        prop_assert_eq!(response.cash_flow.len(), expected);
        prop_assert_eq!(response.debt_payoff.len(), expected);
        prop_assert_eq!(response.real_net_worth.len(), expected);
    }
}
