//! Monthly compounding of annual return and appreciation rates

/// Growth multiplier for one month at an annual rate.
///
/// Negative rates model depreciation and are not clamped; a rate at or
/// below -100% wipes the balance out.
pub fn monthly_factor(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).max(0.0).powf(1.0 / 12.0)
}

/// Balance after one month at `annual_rate`
pub fn grow(balance: f64, annual_rate: f64) -> f64 {
    balance * monthly_factor(annual_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_months_compound_to_annual_rate() {
        let mut balance = 10_000.0;
        for _ in 0..12 {
            balance = grow(balance, 0.07);
        }
        assert!((balance - 10_700.0).abs() < 1e-6, "got {balance}");
    }

    #[test]
    fn test_zero_rate_is_noop() {
        let grown = grow(12_345.67, 0.05);
        assert_eq!(grow(grown, 0.0), grown);
    }

    #[test]
    fn test_depreciation_is_not_clamped() {
        let mut value = 30_000.0;
        for _ in 0..12 {
            value = grow(value, -0.15);
        }
        assert!((value - 25_500.0).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn test_total_loss() {
        assert_eq!(grow(5_000.0, -1.0), 0.0);
    }
}
